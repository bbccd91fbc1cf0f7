/// A trait to abstract over environment variable access.
///
/// Configuration reads a handful of variables. Going through this trait
/// keeps tests independent of the process environment.
pub(crate) trait Environment {
    /// Try reading the environment variable as an OS string.
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString>;

    /// Try reading the environment variable as a string.
    fn read(&self, key: &str) -> Result<String, std::env::VarError> {
        self.read_os(key).map_or_else(
            || Err(std::env::VarError::NotPresent),
            |s| s.into_string().map_err(std::env::VarError::NotUnicode),
        )
    }

    /// Try reading the environment variable as a trimmed, non-empty string.
    ///
    /// This method logs a warning for values that are not valid Unicode.
    fn read_non_empty(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            Ok(_) | Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                log::warn!("ignoring {} because its value is not valid Unicode", key);
                None
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Env();

impl Environment for Env {
    fn read_os(&self, key: &str) -> Option<std::ffi::OsString> {
        std::env::var_os(key)
    }
}

#[cfg(test)]
mod test {
    use super::Environment;
    use std::collections::HashMap;

    pub(crate) struct FakeEnv {
        bindings: HashMap<String, String>,
    }

    impl FakeEnv {
        /// Create a new fake environment.
        pub(crate) fn new() -> FakeEnv {
            FakeEnv {
                bindings: HashMap::new(),
            }
        }

        /// Set the fake environment variable.
        pub(crate) fn set(&mut self, key: &str, value: &str) -> &mut Self {
            self.bindings.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl Environment for FakeEnv {
        fn read_os(&self, key: &str) -> Option<std::ffi::OsString> {
            self.bindings.get(key).map(|v| v.into())
        }
    }

    #[test]
    fn test_read_non_empty() {
        let mut env = FakeEnv::new();
        env.set("BLANK", "  ").set("VALUE", " 0.04 ");
        assert_eq!(env.read_non_empty("BLANK"), None);
        assert_eq!(env.read_non_empty("MISSING"), None);
        assert_eq!(env.read_non_empty("VALUE"), Some("0.04".to_string()));
    }
}

#[cfg(test)]
pub(crate) use test::FakeEnv;
