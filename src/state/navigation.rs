//! Navigation-related state types.

/// Specifying the different dashboard routes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Route {
    Login,
    Dashboard,
    Products,
    Rules,
    Transactions,
    Credits,
    Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_equality() {
        assert_eq!(Route::Login, Route::Login);
        assert_eq!(Route::Dashboard, Route::Dashboard);
        assert_ne!(Route::Login, Route::Dashboard);
        assert_ne!(Route::Products, Route::Rules);
    }
}
