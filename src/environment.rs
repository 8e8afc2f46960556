// Fixed vendor base URLs, selected per call.

pub const API_URL: &str = "https://api.cardskipper.se";
pub const TEST_API_URL: &str = "https://api-test.cardskipper.se";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    pub fn from_test_flag(test_api: bool) -> Self {
        if test_api {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => API_URL,
            Environment::Test => TEST_API_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls_are_fixed_and_distinct() {
        let production = Environment::Production.base_url();
        let test = Environment::Test.base_url();
        assert_eq!(production, "https://api.cardskipper.se");
        assert_eq!(test, "https://api-test.cardskipper.se");
        assert_ne!(production, test);
    }

    #[test]
    fn test_from_test_flag() {
        assert_eq!(Environment::from_test_flag(false), Environment::Production);
        assert_eq!(Environment::from_test_flag(true), Environment::Test);
    }
}
