use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const ALL: [Theme; 3] = [Theme::Auto, Theme::Light, Theme::Dark];

    pub(crate) const fn scheme(self) -> Option<&'static str> {
        use Theme::*;
        match self {
            Auto => None,
            Light => Some("light"),
            Dark => Some("dark"),
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Auto => "Auto",
            Light => "Light",
            Dark => "Dark",
        }
    }

    fn update_html(self) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        if let Some(scheme) = self.scheme() {
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() {
        Self::local_or_default().update_html();
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Auto
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "numerito:theme";
}
