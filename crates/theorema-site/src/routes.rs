//! Site paths.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Theory index
    Math,
    Theory(String),
    Document(String),
    Roadmap,
    Developer,
    Foundations,
    Logic,
    NotFound(String),
}

impl Route {
    /// Query strings, fragments and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["math"] => Route::Math,
            ["math", theory] => Route::Theory(theory.to_string()),
            ["docs", id] => Route::Document(id.to_string()),
            ["roadmap"] => Route::Roadmap,
            ["developer"] => Route::Developer,
            ["foundations"] => Route::Foundations,
            ["logic"] => Route::Logic,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Math => "/math".to_string(),
            Route::Theory(theory) => format!("/math/{}", theory),
            Route::Document(id) => format!("/docs/{}", id),
            Route::Roadmap => "/roadmap".to_string(),
            Route::Developer => "/developer".to_string(),
            Route::Foundations => "/foundations".to_string(),
            Route::Logic => "/logic".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/math/"), Route::Math);
        assert_eq!(
            Route::parse("/math/group_theory?tab=defs#lagrange"),
            Route::Theory("group_theory".to_string())
        );
        assert_eq!(Route::parse("/docs/intro"), Route::Document("intro".to_string()));
        assert_eq!(Route::parse("/logic//"), Route::Logic);
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(
            Route::parse("/math/a/b"),
            Route::NotFound("/math/a/b".to_string())
        );
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".to_string()));
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::Math,
            Route::Theory("rings".to_string()),
            Route::Document("intro".to_string()),
            Route::Developer,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
