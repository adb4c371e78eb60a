//! Index of highlighted days and their class names.

use indexmap::IndexMap;
use serde::Serialize;

use crate::DateUtilsError;
use crate::adapter::DateAdapter;
use crate::consts::{DEFAULT_HIGHLIGHT_CLASS, HIGHLIGHT_KEY_FORMAT};
use crate::prelude::*;
use crate::utils::DateUtils;

/// One entry of a highlight list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightEntry<D> {
    /// Highlighted with [`DEFAULT_HIGHLIGHT_CLASS`]
    Date(D),
    /// Every date highlighted with `class_name`
    Group { class_name: String, dates: Vec<D> },
}

/// Class names per day, keyed by the day formatted as `MM.dd.yyyy`.
///
/// Keys keep first-insertion order, as do the class names under each key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Into, Serialize)]
pub struct HighlightMap(IndexMap<String, Vec<String>>);

impl HighlightMap {
    fn add_class(&mut self, key: String, class_name: &str) {
        let classes = self.0.entry(key).or_default();
        if !classes.iter().any(|existing| existing == class_name) {
            classes.push(class_name.to_owned());
        }
    }
}

impl<A: DateAdapter> DateUtils<'_, A> {
    /// Builds the highlight index for `entries`.
    ///
    /// # Errors
    /// Propagates adapter errors from formatting the day keys.
    pub fn highlight_days_map(&self, entries: &[HighlightEntry<A::Date>]) -> Result<HighlightMap, DateUtilsError> {
        let mut map = HighlightMap::default();
        for entry in entries {
            match entry {
                HighlightEntry::Date(date) => {
                    map.add_class(self.highlight_key(*date)?, DEFAULT_HIGHLIGHT_CLASS);
                },
                HighlightEntry::Group { class_name, dates } => {
                    for &date in dates {
                        map.add_class(self.highlight_key(date)?, class_name);
                    }
                },
            }
        }

        tracing::debug!(days = map.len(), "built highlight map");
        Ok(map)
    }

    /// Class names highlighting `day`, if any.
    pub fn highlight_classes<'m>(&self, map: &'m HighlightMap, day: A::Date) -> Option<&'m [String]> {
        let key = self.highlight_key(day).ok()?;
        map.get(&key).map(Vec::as_slice)
    }

    fn highlight_key(&self, date: A::Date) -> Result<String, DateUtilsError> {
        Ok(self.adapter().format_by_string(self.adapter().date(date), HIGHLIGHT_KEY_FORMAT, None)?)
    }
}
