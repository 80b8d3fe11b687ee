use crate::theme::Theme;
use crate::utils::*;
use numerito_core as game;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// UI-side bounds, imposed on every change; the core clamps again on its own
/// limits so a hand-edited storage value cannot produce a degenerate round.
pub(crate) const LENGTH_RANGE: (u8, u8) = (1, 10);
pub(crate) const DIGITS_RANGE: (u8, u8) = (1, 6);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub mode: game::Mode,
    pub length: u8,
    pub digits: u8,
}

impl Settings {
    pub(crate) fn clamped(self) -> Self {
        Self {
            mode: self.mode,
            length: self.length.clamp(LENGTH_RANGE.0, LENGTH_RANGE.1),
            digits: self.digits.clamp(DIGITS_RANGE.0, DIGITS_RANGE.1),
        }
    }

    pub(crate) fn game_config(self) -> game::GameConfig {
        let clamped = self.clamped();
        game::GameConfig::new(clamped.mode, clamped.length, clamped.digits)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: game::Mode::Normal,
            length: 4,
            digits: 2,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "numerito:settings:v1";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub settings: Settings,
    #[prop_or_default]
    pub open: bool,
    #[prop_or_default]
    pub disabled: bool,
    pub onchange: Callback<Settings>,
}

#[function_component(SettingsView)]
pub(crate) fn settings_view(props: &SettingsProps) -> Html {
    let settings = props.settings;

    let on_mode = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Some(mode) = game::Mode::from_label(&select.value()) {
                onchange.emit(Settings { mode, ..settings });
            }
        })
    };

    let on_length = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Ok(length) = input.value().parse::<u8>() {
                onchange.emit(Settings { length, ..settings }.clamped());
            }
        })
    };

    let on_digits = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Ok(digits) = input.value().parse::<u8>() {
                onchange.emit(Settings { digits, ..settings }.clamped());
            }
        })
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label for="game-mode">{"Mode"}</label>
                <select id="game-mode" disabled={props.disabled} onchange={on_mode}>
                    {
                        for game::Mode::ALL.into_iter().map(|mode| html! {
                            <option
                                value={mode.label()}
                                selected={mode == settings.mode}
                            >
                                { mode.label() }
                            </option>
                        })
                    }
                </select>
                <label for="num-length">{"How many numbers"}</label>
                <input
                    id="num-length"
                    type="number"
                    min={LENGTH_RANGE.0.to_string()}
                    max={LENGTH_RANGE.1.to_string()}
                    value={settings.length.to_string()}
                    disabled={props.disabled}
                    onchange={on_length}
                />
                <label for="num-digits">{"Digits per number"}</label>
                <input
                    id="num-digits"
                    type="number"
                    min={DIGITS_RANGE.0.to_string()}
                    max={DIGITS_RANGE.1.to_string()}
                    value={settings.digits.to_string()}
                    disabled={props.disabled}
                    onchange={on_digits}
                />
                <ul>
                    {
                        for Theme::ALL.into_iter().map(|theme| {
                            let onclick = Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                Theme::apply(theme);
                            });
                            html! {
                                <li><a href="#" {onclick}>{ theme.label() }</a></li>
                            }
                        })
                    }
                </ul>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_imposes_min_and_max() {
        let settings = Settings {
            mode: game::Mode::Pro,
            length: 0,
            digits: 99,
        };
        let clamped = settings.clamped();
        assert_eq!(clamped.length, LENGTH_RANGE.0);
        assert_eq!(clamped.digits, DIGITS_RANGE.1);
        assert_eq!(clamped.mode, game::Mode::Pro);
    }

    #[test]
    fn game_config_reflects_clamped_settings() {
        let settings = Settings {
            mode: game::Mode::Chaotic,
            length: 3,
            digits: 2,
        };
        let config = settings.game_config();
        assert_eq!(config.mode, game::Mode::Chaotic);
        assert_eq!(config.count, 3);
        assert_eq!(config.digits, 2);
    }

    #[test]
    fn storage_key_is_versioned_and_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "numerito:settings:v1");
    }
}
