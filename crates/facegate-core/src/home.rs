use crate::surface::Surface;

/// Signed-in user shown on the home screen.
#[derive(Debug, Default)]
pub struct HomeFlow {
    current_user: Option<String>,
}

impl HomeFlow {
    /// Remember who matched. Called as soon as recognition succeeds. A match
    /// without a name leaves nobody signed in.
    pub fn sign_in(&mut self, name: &str) {
        self.current_user = (!name.is_empty()).then(|| name.to_string());
    }

    /// Screen entry hook: display the signed-in name.
    pub fn enter<S: Surface + ?Sized>(&mut self, surface: &mut S, name: &str) {
        self.sign_in(name);
        if !name.is_empty() {
            surface.set_user_name(name);
        }
        tracing::info!(user = name, "dashboard opened");
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!(user = %user, "logged out");
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Dashboard buttons other than log out have no server-side effect yet.
    pub fn action(&self, label: &str) {
        tracing::info!(
            action = label,
            user = self.current_user.as_deref().unwrap_or("-"),
            "dashboard action"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_enter_displays_name() {
        let mut surface = MemorySurface::default();
        let mut home = HomeFlow::default();
        home.enter(&mut surface, "Ada");
        assert_eq!(home.current_user(), Some("Ada"));
        assert_eq!(surface.user_name, "Ada");
    }

    #[test]
    fn test_empty_name_keeps_previous_display() {
        let mut surface = MemorySurface::default();
        surface.user_name = "Ada".into();
        let mut home = HomeFlow::default();
        home.enter(&mut surface, "");
        assert_eq!(surface.user_name, "Ada");
        assert_eq!(home.current_user(), None);
    }

    #[test]
    fn test_logout_clears_user() {
        let mut home = HomeFlow::default();
        home.sign_in("Ada");
        home.logout();
        assert_eq!(home.current_user(), None);
        home.logout();
    }
}
