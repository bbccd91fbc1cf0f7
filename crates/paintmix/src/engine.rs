//! Matching target colors against a palette's candidate layers.
//!
//! A [`MatchingEngine`] caches the candidates for the current palette and
//! background. Changing the palette recomputes all candidates, whereas
//! changing the background only recomputes the thinned layers. Queries
//! compare the target color against each candidate in Oklab and return the
//! closest candidates as [`SimilarColor`]s.
//!
//! The engine does not synchronize. Callers sharing an engine between
//! threads must serialize updates and queries, e.g., with a mutex.

use std::collections::HashSet;
use std::time::Instant;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::algebra::CandidateSet;
use crate::config::MixingConfig;
use crate::error::ColorFormatError;
use crate::mixture::Layer;
use crate::pigment::{Background, Palette, Rgb};
use crate::Float;

/// A candidate layer and its distance to the target color.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix.engine"))]
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarColor {
    layer: Layer,
    delta_e: Float,
}

impl SimilarColor {
    /// Get the layer.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Get the perceptual distance in Oklab.
    pub fn delta_e(&self) -> Float {
        self.delta_e
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl SimilarColor {
    /// Get the perceptual distance in Oklab. <i class=python-only>Python
    /// only!</i>
    #[getter(delta_e)]
    pub fn py_delta_e(&self) -> Float {
        self.delta_e
    }

    /// Get the layer's color. <i class=python-only>Python only!</i>
    #[getter]
    pub fn rgb(&self) -> Rgb {
        self.layer.rgb()
    }

    /// Get the layer's identity key. <i class=python-only>Python only!</i>
    #[getter]
    pub fn identity_key(&self) -> String {
        self.layer.identity_key()
    }

    /// Get the layer's description. <i class=python-only>Python only!</i>
    #[getter]
    pub fn description(&self) -> String {
        self.layer.description()
    }

    /// Convert this similar color to a string. <i class=python-only>Python
    /// only!</i>
    pub fn __str__(&self) -> String {
        format!("{}", self)
    }
}

impl std::fmt::Display for SimilarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with ΔE {:.4}", self.layer, self.delta_e)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Sort by ascending ΔE and keep the first color per content hash.
fn sort_and_dedup(colors: &mut Vec<SimilarColor>) {
    colors.sort_by(|c1, c2| c1.delta_e.total_cmp(&c2.delta_e));
    let mut seen = HashSet::new();
    colors.retain(|color| seen.insert(color.layer.content_hash()));
}

/// Offer the color to the bounded list of closest colors.
///
/// The list stays sorted by ascending ΔE, holds at most one color per
/// content hash, and no more than `capacity` colors.
fn offer(closest: &mut Vec<SimilarColor>, layer: &Layer, delta_e: Float, capacity: usize) {
    if capacity == 0 {
        return;
    }

    let hash = layer.content_hash();
    if let Some(index) = closest
        .iter()
        .position(|color| color.layer.content_hash() == hash)
    {
        if delta_e < closest[index].delta_e {
            closest.remove(index);
        } else {
            return;
        }
    } else if capacity <= closest.len() {
        match closest.last() {
            Some(last) if delta_e < last.delta_e => {
                closest.pop();
            }
            _ => return,
        }
    }

    let index = closest.partition_point(|color| color.delta_e <= delta_e);
    closest.insert(
        index,
        SimilarColor {
            layer: layer.clone(),
            delta_e,
        },
    );
}

// --------------------------------------------------------------------------------------------------------------------

/// An engine for finding mixtures that look like a target color.
#[cfg_attr(feature = "pyffi", pyclass(module = "paintmix.engine"))]
#[derive(Debug, Default)]
pub struct MatchingEngine {
    config: MixingConfig,
    fingerprint: Option<u64>,
    background: Option<Background>,
    candidates: CandidateSet,
}

impl MatchingEngine {
    /// Create a new engine with the configuration.
    pub fn new(config: MixingConfig) -> Self {
        Self {
            config,
            fingerprint: None,
            background: None,
            candidates: CandidateSet::default(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MixingConfig {
        &self.config
    }

    /// Get the background.
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Set the palette.
    ///
    /// This method recomputes all candidates, which may take a while for
    /// large palettes. It does nothing if the palette has the same
    /// fingerprint as the current one.
    pub fn set_palette(&mut self, palette: &Palette) {
        let fingerprint = palette.fingerprint();
        if self.fingerprint == Some(fingerprint) {
            log::debug!("reusing candidates for palette {:016x}", fingerprint);
            return;
        }

        let start = Instant::now();
        self.candidates = CandidateSet::new(palette, self.background.as_ref(), &self.config);
        self.fingerprint = Some(fingerprint);
        log::debug!(
            "computed {} candidates for palette {:016x} in {:?}",
            self.candidates.len(),
            fingerprint,
            start.elapsed()
        );
    }

    /// Set the background.
    ///
    /// This method recomputes the thinned layers only. It does nothing if
    /// the background is the same as the current one.
    pub fn set_background(&mut self, background: Background) {
        if self.background.as_ref() == Some(&background) {
            log::debug!("reusing thinned layers for background {}", background.rgb());
            return;
        }

        self.candidates
            .set_background(Some(&background), &self.config);
        self.background = Some(background);
    }

    /// Clear the background, which also drops the thinned layers.
    pub fn clear_background(&mut self) {
        if self.background.take().is_some() {
            self.candidates.set_background(None, &self.config);
        }
    }

    /// Get the total number of candidate layers.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Get the thick layers.
    pub fn thick_layers(&self) -> &[Layer] {
        self.candidates.thick_layers()
    }

    /// Get the thinned layers.
    pub fn thinned_layers(&self) -> &[Layer] {
        self.candidates.thinned_layers()
    }

    /// Find candidates that look like the target color.
    ///
    /// Thick and thinned layers form two groups. Candidates farther than
    /// `limit` from the target are ignored, unless `limit` is zero. Within
    /// each group, candidates at most `threshold` away qualify, keeping only
    /// the closest candidate for each set of pigments and at most
    /// `max_per_group` candidates. This method returns the qualifying
    /// candidates of both groups, sorted by ascending ΔE and again with one
    /// candidate per set of pigments.
    ///
    /// If no candidate qualifies, this method instead returns the closest
    /// `max_per_group` candidates of each group, again with one candidate per
    /// set of pigments. If the target color is the background color, this
    /// method returns no candidates at all.
    pub fn find_similar_colors(
        &self,
        target: Rgb,
        threshold: Float,
        limit: Float,
        max_per_group: usize,
    ) -> Vec<SimilarColor> {
        if self.background.as_ref().is_some_and(|b| b.rgb() == target) {
            return Vec::new();
        }

        let start = Instant::now();
        let oklab = target.to_oklab();
        let mut qualifying = Vec::new();
        let mut fallback = Vec::new();

        for group in [self.thick_layers(), self.thinned_layers()] {
            let mut group_qualifying = Vec::new();
            let mut group_fallback = Vec::new();

            for layer in group {
                let delta_e = layer.delta_e(&oklab);
                if 0.0 < limit && limit < delta_e {
                    continue;
                }

                if delta_e <= threshold {
                    group_qualifying.push(SimilarColor {
                        layer: layer.clone(),
                        delta_e,
                    });
                } else if qualifying.is_empty() && group_qualifying.is_empty() {
                    offer(&mut group_fallback, layer, delta_e, max_per_group);
                }
            }

            sort_and_dedup(&mut group_qualifying);
            group_qualifying.truncate(max_per_group);
            qualifying.append(&mut group_qualifying);
            fallback.append(&mut group_fallback);
        }

        let mut result = if qualifying.is_empty() {
            fallback
        } else {
            qualifying
        };
        sort_and_dedup(&mut result);

        log::debug!(
            "found {} colors similar to {} in {:?}",
            result.len(),
            target,
            start.elapsed()
        );
        result
    }

    /// Find candidates that look like the target color in hashed hexadecimal
    /// notation. See [`MatchingEngine::find_similar_colors`].
    pub fn find_similar_colors_hex(
        &self,
        target: &str,
        threshold: Float,
        limit: Float,
        max_per_group: usize,
    ) -> Result<Vec<SimilarColor>, ColorFormatError> {
        let target: Rgb = target.parse()?;
        Ok(self.find_similar_colors(target, threshold, limit, max_per_group))
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl MatchingEngine {
    /// Create a new engine configured from the environment. <i
    /// class=python-only>Python only!</i>
    #[new]
    pub fn py_new() -> Self {
        Self::new(MixingConfig::from_environment())
    }

    /// Set the palette. <i class=python-only>Python only!</i>
    #[pyo3(name = "set_palette")]
    pub fn py_set_palette(&mut self, palette: &Palette) {
        self.set_palette(palette)
    }

    /// Set the background. <i class=python-only>Python only!</i>
    #[pyo3(name = "set_background")]
    pub fn py_set_background(&mut self, background: Background) {
        self.set_background(background)
    }

    /// Clear the background. <i class=python-only>Python only!</i>
    #[pyo3(name = "clear_background")]
    pub fn py_clear_background(&mut self) {
        self.clear_background()
    }

    /// Get the total number of candidate layers. <i
    /// class=python-only>Python only!</i>
    #[pyo3(name = "candidate_count")]
    pub fn py_candidate_count(&self) -> usize {
        self.candidate_count()
    }

    /// Find candidates that look like the target color. <i
    /// class=python-only>Python only!</i>
    #[pyo3(name = "find_similar_colors")]
    pub fn py_find_similar_colors(
        &self,
        target: Rgb,
        threshold: Float,
        limit: Float,
        max_per_group: usize,
    ) -> Vec<SimilarColor> {
        self.find_similar_colors(target, threshold, limit, max_per_group)
    }
}
