/// Screens of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Main,
    Profile { github_username: String },
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Main => "DevRadar",
            Route::Profile { .. } => "Perfil do Github",
        }
    }

    /// Page shown by the profile screen
    pub fn profile_url(&self) -> Option<String> {
        match self {
            Route::Main => None,
            Route::Profile { github_username } => {
                Some(format!("https://github.com/{}", urlencoding::encode(github_username)))
            }
        }
    }
}

/// Stack navigator rooted at [`Route::Main`]
#[derive(Debug, Clone)]
pub struct Navigator {
    root: Route,
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            root: Route::Main,
            stack: Vec::new(),
        }
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!("Navigating to {:?}", route);
        self.stack.push(route);
    }

    /// Go back one screen. The root screen is never popped.
    pub fn pop(&mut self) -> Option<Route> {
        self.stack.pop()
    }

    pub fn current(&self) -> &Route {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Number of screens on the stack, root included
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
