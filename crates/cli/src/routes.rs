use models::AnimalType;

/// A page reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    /// Animals list page for one type.
    Animals(AnimalType),
    /// Animal detail page.
    Animal(String),
}

impl Default for Route {
    fn default() -> Self {
        Route::Animals(AnimalType::Cat)
    }
}

impl Route {
    /// Match a path against the route table. `None` means the path only redirects.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim().trim_matches('/');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["cats"] => Some(Route::Animals(AnimalType::Cat)),
            ["chickens"] => Some(Route::Animals(AnimalType::Chicken)),
            ["dogs"] => Some(Route::Animals(AnimalType::Dog)),
            ["animal", id] if !id.is_empty() => Some(Route::Animal(id.to_string())),
            _ => None,
        }
    }

    /// Resolve a path, following the redirect for the empty path and any unknown one.
    pub fn resolve(path: &str) -> Route {
        Route::parse(path).unwrap_or_default()
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Animals(kind) => format!("/{}", kind.collection()),
            Route::Animal(id) => format!("/animal/{id}"),
        }
    }

    /// List page to go back to from an animal of the given type.
    pub fn list_for(kind: Option<AnimalType>) -> Route {
        Route::Animals(kind.unwrap_or(AnimalType::Cat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_pages() {
        assert_eq!(Route::resolve("login"), Route::Login);
        assert_eq!(Route::resolve("/cats"), Route::Animals(AnimalType::Cat));
        assert_eq!(Route::resolve("chickens/"), Route::Animals(AnimalType::Chicken));
        assert_eq!(Route::resolve("dogs"), Route::Animals(AnimalType::Dog));
        assert_eq!(Route::resolve("/animal/abc123"), Route::Animal("abc123".into()));
    }

    #[test]
    fn empty_and_unknown_paths_redirect_to_cats() {
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::resolve(""), Route::Animals(AnimalType::Cat));
        assert_eq!(Route::resolve("/hamsters"), Route::Animals(AnimalType::Cat));
        assert_eq!(Route::resolve("/animal/"), Route::Animals(AnimalType::Cat));
        assert_eq!(Route::resolve("/animal/1/extra"), Route::Animals(AnimalType::Cat));
    }

    #[test]
    fn query_strings_are_ignored() {
        assert_eq!(Route::resolve("/dogs?page=2"), Route::Animals(AnimalType::Dog));
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Login, Route::Animals(AnimalType::Dog), Route::Animal("7".into())] {
            assert_eq!(Route::resolve(&route.path()), route);
        }
        assert_eq!(Route::list_for(Some(AnimalType::Chicken)).path(), "/chickens");
        assert_eq!(Route::list_for(None).path(), "/cats");
    }
}
