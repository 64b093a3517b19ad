//! Browser/OS detection for platform-specific quirks.
//!
//! The interceptor needs to know about a few input quirks (Android Chrome
//! backspace, Safari composition timing). Detection parses the user-agent
//! string; the parse is pure so it can be tested natively.

/// Platform flags relevant to input handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    pub android: bool,
    pub ios: bool,
    pub macos: bool,
    pub chrome: bool,
    pub safari: bool,
    pub firefox: bool,
}

impl Platform {
    /// Parse a user-agent string.
    pub fn from_user_agent(ua: &str) -> Self {
        let android = ua.contains("Android");
        let ios = ua.contains("iPhone") || ua.contains("iPad");
        let macos = ua.contains("Mac OS X") && !ios;
        let firefox = ua.contains("Firefox/");
        let chrome = ua.contains("Chrome/") || ua.contains("CriOS/");
        // Safari's token appears in Chrome UAs too; require its absence.
        let safari = ua.contains("Safari/") && !chrome && !firefox;
        Self {
            android,
            ios,
            macos,
            chrome,
            safari,
            firefox,
        }
    }
}

/// Detect the current platform from `navigator.userAgent`.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn platform() -> Platform {
    let ua = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.user_agent().ok())
        .unwrap_or_default();
    Platform::from_user_agent(&ua)
}

/// Native twin: no browser, no quirks.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn platform() -> Platform {
    Platform::default()
}
