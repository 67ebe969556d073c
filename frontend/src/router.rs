//! Client-side routing and the authentication guard.

/// A navigable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login` (public)
    Login,
    /// `/cadastro` (public, registration)
    Register,
    /// `/medias` (private)
    Medias,
    /// `/playlists` (private)
    Playlists,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/cadastro",
            Route::Medias => "/medias",
            Route::Playlists => "/playlists",
        }
    }

    /// Parse a URL path. `/` and unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "/login" => Some(Route::Login),
            "/cadastro" => Some(Route::Register),
            "/medias" => Some(Route::Medias),
            "/playlists" => Some(Route::Playlists),
            _ => None,
        }
    }

    /// Private routes need a token and render with the navigation bar.
    pub fn is_private(&self) -> bool {
        matches!(self, Route::Medias | Route::Playlists)
    }
}

/// Outcome of checking a route against the authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(Route),
}

/// Private pages require a token; public pages are off limits once logged in.
pub fn guard(route: Route, authenticated: bool) -> Guard {
    match (route.is_private(), authenticated) {
        (true, false) => Guard::Redirect(Route::Login),
        (false, true) => Guard::Redirect(Route::Medias),
        _ => Guard::Allow,
    }
}

/// Resolve a URL path to the page that ends up rendered.
///
/// `/` and unknown paths redirect to `/login`, which is then guarded like any
/// other route.
pub fn resolve(path: &str, authenticated: bool) -> Route {
    let route = Route::from_path(path).unwrap_or(Route::Login);
    match guard(route, authenticated) {
        Guard::Allow => route,
        Guard::Redirect(target) => target,
    }
}

/// Current route, mirrored to the browser location on WASM.
#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Router {
    /// Start at the route the browser was opened on (or `/` natively).
    pub fn new(authenticated: bool) -> Self {
        let router = Self {
            current: resolve(&browser_path(), authenticated),
        };
        push_browser_path(router.current.path());
        router
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigate to `route`, applying the guard.
    pub fn navigate(&mut self, route: Route, authenticated: bool) {
        let target = resolve(route.path(), authenticated);
        if target != self.current {
            tracing::info!("Navigating {} -> {}", self.current.path(), target.path());
            self.current = target;
        }
        push_browser_path(self.current.path());
    }

    /// Re-check the current route, following browser back/forward on WASM.
    ///
    /// Called once per frame so that login and logout take effect immediately.
    pub fn enforce(&mut self, authenticated: bool) {
        let path = browser_path();
        let requested = match Route::from_path(&path) {
            Some(route) if route != self.current => route,
            _ => self.current,
        };
        let target = resolve(requested.path(), authenticated);
        if target != self.current {
            tracing::debug!("Route guard: {} -> {}", self.current.path(), target.path());
            self.current = target;
        }
        if path != self.current.path() {
            push_browser_path(self.current.path());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(target_arch = "wasm32")]
fn push_browser_path(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if window.location().pathname().ok().as_deref() == Some(path) {
        return;
    }
    if let Ok(history) = window.history() {
        if history
            .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
            .is_err()
        {
            tracing::warn!("Failed to push browser history entry {}", path);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_PATH: std::cell::RefCell<String> = std::cell::RefCell::new("/".to_string());
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_path() -> String {
    NATIVE_PATH.with(|p| p.borrow().clone())
}

#[cfg(not(target_arch = "wasm32"))]
fn push_browser_path(path: &str) {
    NATIVE_PATH.with(|p| *p.borrow_mut() = path.to_string());
}
