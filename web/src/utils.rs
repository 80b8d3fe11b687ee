use gloo::storage::{LocalStorage, Storage};
use numerito_core::{Millis, Score};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced local-storage key for a persisted type.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// The best score is stored as a plain decimal string (e.g. `"4.50"`), not
/// JSON, so it stays readable and an absent key simply means "no record yet".
pub(crate) const BEST_SCORE_KEY: &str = "numerito:high-score";

pub(crate) fn load_best_score() -> Option<Score> {
    LocalStorage::raw()
        .get_item(BEST_SCORE_KEY)
        .ok()
        .flatten()
        .and_then(|stored| Score::parse(&stored))
}

pub(crate) fn save_best_score(score: Score) {
    if let Err(err) = LocalStorage::raw().set_item(BEST_SCORE_KEY, &score.to_storage()) {
        log::error!("could not save high score: {:?}", err);
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn now_ms() -> Millis {
    js_sys::Date::now() as Millis
}
