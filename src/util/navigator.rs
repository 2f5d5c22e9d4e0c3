//! Navigation side effects used by the auth guard and response interceptor.

use std::rc::Rc;

use leptos_router::NavigateOptions;

pub trait Navigator {
    /// Leave the app for an absolute URL (aborts in-app routing).
    fn redirect_external(&self, url: &str);
    /// In-app navigation to `path`.
    fn push(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn redirect_external(&self, url: &str) {
        (**self).redirect_external(url);
    }

    fn push(&self, path: &str) {
        (**self).push(path);
    }
}

/// Browser navigator: `window.location` for external redirects, the router's
/// `navigate` for in-app pushes.
#[derive(Clone)]
pub struct BrowserNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl BrowserNavigator {
    pub fn new<F>(navigate: F) -> Self
    where
        F: Fn(&str, NavigateOptions) + 'static,
    {
        Self { navigate: Rc::new(navigate) }
    }
}

impl Navigator for BrowserNavigator {
    fn redirect_external(&self, url: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(url);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
        }
    }

    fn push(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }
}
