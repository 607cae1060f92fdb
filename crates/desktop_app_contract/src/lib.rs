//! Shared contract types between the desktop window manager and hosted applications.
//!
//! A hosted application receives three lifecycle callbacks when it is constructed and hands
//! back an [`AppInstance`]: its rendered surface plus an optional teardown hook. The manager
//! never inspects anything else about the application.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

/// Stable identifier for a hosted application type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted constants and tests.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut count = 0usize;
    for part in raw.split('.') {
        count += 1;
        if part.is_empty() || part.len() > 32 {
            return false;
        }
        let bytes = part.as_bytes();
        if !bytes[0].is_ascii_lowercase() {
            return false;
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        {
            return false;
        }
        if part.ends_with('-') {
            return false;
        }
    }

    count >= 2
}

/// Shared zero-argument callback.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn()>);

impl Hook {
    /// Wraps a closure.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A hook that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Invokes the hook.
    pub fn run(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

impl PartialEq for Hook {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Teardown hook a hosted application may expose so the manager can release its timers,
/// audio contexts or connections when the instance is discarded.
pub type TeardownHook = Hook;

#[derive(Debug, Clone, PartialEq)]
/// Lifecycle callbacks bound by the manager when an instance is created.
///
/// The bindings are made exactly once per instance and stay valid for its whole life; an
/// application may call them any number of times. Calls made after the instance has been
/// removed or replaced by a newer instance of the same application are ignored.
pub struct WindowCallbacks {
    /// Request focus (for example on any pointer-down inside the app).
    pub on_interact: Hook,
    /// Request minimization.
    pub on_minimize: Hook,
    /// Request close; the manager starts its deferred-removal sequence.
    pub on_close: Hook,
}

impl WindowCallbacks {
    /// Callbacks that ignore every request.
    pub fn detached() -> Self {
        Self {
            on_interact: Hook::noop(),
            on_minimize: Hook::noop(),
            on_close: Hook::noop(),
        }
    }

    /// Calls `on_interact`.
    pub fn interact(&self) {
        self.on_interact.run();
    }

    /// Calls `on_minimize`.
    pub fn minimize(&self) {
        self.on_minimize.run();
    }

    /// Calls `on_close`.
    pub fn close(&self) {
        self.on_close.run();
    }
}

/// Named, payload-less request to open an application that has no desktop shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaunchSignal(String);

impl LaunchSignal {
    /// Creates a signal from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the signal name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaunchSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit launch channel registered by the compositor.
///
/// Collaborators that need to start another application hold a clone of this handle instead
/// of broadcasting through an ambient event bus.
#[derive(Clone)]
pub struct LaunchRequester(Rc<dyn Fn(LaunchSignal)>);

impl LaunchRequester {
    /// Creates a requester forwarding to `sink`.
    pub fn new(sink: impl Fn(LaunchSignal) + 'static) -> Self {
        Self(Rc::new(sink))
    }

    /// A requester that drops every signal.
    pub fn disconnected() -> Self {
        Self::new(|_| {})
    }

    /// Raises `signal` on the channel.
    pub fn raise(&self, signal: impl Into<String>) {
        (self.0)(LaunchSignal::new(signal))
    }
}

impl fmt::Debug for LaunchRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LaunchRequester(..)")
    }
}

#[derive(Debug, Clone)]
/// Context injected by the manager into an application factory.
pub struct AppMountContext {
    /// App id from the catalog.
    pub app_id: ApplicationId,
    /// Lifecycle callbacks bound to this instance.
    pub callbacks: WindowCallbacks,
    /// Launch channel for opening other applications.
    pub launcher: LaunchRequester,
}

#[derive(Debug, Clone, PartialEq)]
/// A constructed hosted application owned by the window registry.
pub struct AppInstance<H> {
    /// Rendered surface (a Leptos `View` in the browser runtime).
    pub surface: H,
    /// Optional hook invoked once when the manager discards the instance.
    pub teardown: Option<TeardownHook>,
}

impl<H> AppInstance<H> {
    /// Creates an instance without a teardown hook.
    pub fn new(surface: H) -> Self {
        Self {
            surface,
            teardown: None,
        }
    }

    /// Attaches a teardown hook.
    pub fn with_teardown(mut self, teardown: impl Fn() + 'static) -> Self {
        self.teardown = Some(Hook::new(teardown));
        self
    }
}

/// Factory function used to construct an application instance.
pub type AppFactory<H> = Rc<dyn Fn(AppMountContext) -> AppInstance<H>>;

/// App module descriptor used by the runtime app catalog.
pub struct AppModule<H> {
    factory: AppFactory<H>,
}

impl<H> AppModule<H> {
    /// Creates a module from a factory closure.
    pub fn new(factory: impl Fn(AppMountContext) -> AppInstance<H> + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
        }
    }

    /// Builds a new instance with a runtime-provided context.
    pub fn mount(&self, context: AppMountContext) -> AppInstance<H> {
        (self.factory)(context)
    }
}

impl<H> Clone for AppModule<H> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<H> fmt::Debug for AppModule<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppModule(..)")
    }
}

/// Instance type hosted by the browser runtime.
pub type ViewInstance = AppInstance<leptos::View>;

/// Module type hosted by the browser runtime.
pub type ViewModule = AppModule<leptos::View>;
