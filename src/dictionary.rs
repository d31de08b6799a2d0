use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::call::Id;

/// A fixed choice used to classify calls.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DictionaryEntry {
    pub id: Id,
    pub name: String,
}

impl DictionaryEntry {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        DictionaryEntry {
            id,
            name: name.into(),
        }
    }
}

/// Names one of the classification lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DictionaryKind {
    Purposes,
    Categories,
    Subcategories,
    Tags,
}

impl FromStr for DictionaryKind {
    type Err = UnknownDictionary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purposes" => Ok(DictionaryKind::Purposes),
            "categories" => Ok(DictionaryKind::Categories),
            "subcategories" => Ok(DictionaryKind::Subcategories),
            "tags" => Ok(DictionaryKind::Tags),
            _ => Err(UnknownDictionary),
        }
    }
}

#[derive(Debug)]
pub struct UnknownDictionary;

lazy_static! {
    static ref PURPOSES: Vec<DictionaryEntry> = entries(&[
        "Запись на приём",
        "Перенос/отмена визита",
        "Консультация по услугам",
        "Жалоба/претензия",
        "Уточнение расписания",
        "Вопрос по результатам анализов",
        "Финансовые вопросы",
        "Вопрос по страхованию",
        "Техническая помощь",
        "Прочее",
    ]);
    static ref CATEGORIES: Vec<DictionaryEntry> = entries(&[
        "Медицинские услуги",
        "Лаборатория/анализы",
        "Расписание/приём",
        "Финансы/страхование",
        "Жалобы и предложения",
        "Технические вопросы",
        "Прочее",
    ]);
}

/// Numbers names from 1 in order.
fn entries(names: &[&str]) -> Vec<DictionaryEntry> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| DictionaryEntry::new(id, *name))
        .collect()
}

/// The read-only classification lists.
#[derive(Clone, Debug)]
pub struct Dictionaries {
    purposes: Vec<DictionaryEntry>,
    categories: Vec<DictionaryEntry>,
    subcategories: Vec<DictionaryEntry>,
    tags: Vec<DictionaryEntry>,
}

impl Dictionaries {
    pub fn new(
        purposes: Vec<DictionaryEntry>,
        categories: Vec<DictionaryEntry>,
        subcategories: Vec<DictionaryEntry>,
        tags: Vec<DictionaryEntry>,
    ) -> Self {
        Dictionaries {
            purposes,
            categories,
            subcategories,
            tags,
        }
    }

    pub fn entries(&self, kind: DictionaryKind) -> &[DictionaryEntry] {
        match kind {
            DictionaryKind::Purposes => &self.purposes,
            DictionaryKind::Categories => &self.categories,
            DictionaryKind::Subcategories => &self.subcategories,
            DictionaryKind::Tags => &self.tags,
        }
    }
}

impl Default for Dictionaries {
    /// The clinic call-center lists. Subcategories and tags start empty.
    fn default() -> Self {
        Dictionaries::new(PURPOSES.clone(), CATEGORIES.clone(), vec![], vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists() {
        let dictionaries = Dictionaries::default();

        let purposes = dictionaries.entries(DictionaryKind::Purposes);
        assert_eq!(purposes.len(), 10);
        assert_eq!(purposes[0], DictionaryEntry::new(1, "Запись на приём"));
        assert_eq!(purposes[9], DictionaryEntry::new(10, "Прочее"));

        let categories = dictionaries.entries(DictionaryKind::Categories);
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[6].id, 7);

        assert!(dictionaries.entries(DictionaryKind::Subcategories).is_empty());
        assert!(dictionaries.entries(DictionaryKind::Tags).is_empty());
    }

    #[test]
    fn kinds_parse_from_path_segments() {
        assert_eq!("tags".parse::<DictionaryKind>().unwrap(), DictionaryKind::Tags);
        assert!("purpose".parse::<DictionaryKind>().is_err());
    }
}
