//! Navigation highlighting.

/// Names of the rendered routes. The desktop index (`/`) is unnamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Login,
    Home,
    Contact,
    About,
    PostDetail,
    Create,
}

/// Entries of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    About,
    Contact,
}

/// `"current"` for the entry matching the current route, `""` otherwise.
pub fn current_class(route: Option<RouteName>, item: NavItem) -> &'static str {
    let current = match item {
        NavItem::Home => matches!(route, None | Some(RouteName::Home)),
        NavItem::About => route == Some(RouteName::About),
        NavItem::Contact => route == Some(RouteName::Contact),
    };

    if current { "current" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_is_current_on_index_and_home() {
        assert_eq!(current_class(None, NavItem::Home), "current");
        assert_eq!(current_class(Some(RouteName::Home), NavItem::Home), "current");
        assert_eq!(current_class(Some(RouteName::About), NavItem::Home), "");
    }

    #[test]
    fn test_about_and_contact_only_on_their_routes() {
        assert_eq!(current_class(Some(RouteName::About), NavItem::About), "current");
        assert_eq!(current_class(None, NavItem::About), "");
        assert_eq!(
            current_class(Some(RouteName::Contact), NavItem::Contact),
            "current"
        );
        assert_eq!(current_class(Some(RouteName::Create), NavItem::Contact), "");
    }
}
