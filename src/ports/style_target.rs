//! Style Target Port - the document root presentation surface.
//!
//! Mirrors the handful of DOM operations profile application needs. Calls are
//! synchronous and infallible; a surface that cannot be styled ignores them.

/// Port for setting root-level CSS variables and classes
pub trait StyleTarget: Send + Sync {
    fn set_property(&self, name: &str, value: &str);

    fn remove_property(&self, name: &str);

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);
}
