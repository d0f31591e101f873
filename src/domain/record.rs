use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Constant `gender` written on every record.
pub const GENDER: &str = "female";

/// Constant Google product taxonomy id written on every record.
pub const GOOGLE_PRODUCT_CATEGORY: &str = "2271";

/// Product attributes understood by the feed.
///
/// Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    ItemGroupId,
    Mpn,
    Title,
    ImageLink,
    Link,
    Gender,
    Brand,
    Availability,
    Color,
    Price,
    ProductType,
    GoogleProductCategory,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::ItemGroupId,
        Field::Mpn,
        Field::Title,
        Field::ImageLink,
        Field::Link,
        Field::Gender,
        Field::Brand,
        Field::Availability,
        Field::Color,
        Field::Price,
        Field::ProductType,
        Field::GoogleProductCategory,
    ];

    /// Element name used in the feed.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::ItemGroupId => "item_group_id",
            Field::Mpn => "mpn",
            Field::Title => "title",
            Field::ImageLink => "image_link",
            Field::Link => "link",
            Field::Gender => "gender",
            Field::Brand => "brand",
            Field::Availability => "availability",
            Field::Color => "color",
            Field::Price => "price",
            Field::ProductType => "product_type",
            Field::GoogleProductCategory => "google_product_category",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product's attributes, keyed by [`Field`].
///
/// Every field except the two constants is optional. Records are built by
/// the extractor and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProductRecord {
    fields: BTreeMap<Field, String>,
}

impl ProductRecord {
    pub fn new() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(Field::Gender, GENDER.to_string());
        fields.insert(Field::GoogleProductCategory, GOOGLE_PRODUCT_CATEGORY.to_string());
        Self { fields }
    }

    pub(crate) fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Populated fields in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for ProductRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_carries_constants() {
        let record = ProductRecord::new();
        assert_eq!(record.get(Field::Gender), Some("female"));
        assert_eq!(record.get(Field::GoogleProductCategory), Some("2271"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_iter_follows_field_order() {
        let mut record = ProductRecord::new();
        record.set(Field::Price, "$1,200");
        record.set(Field::Id, "19023311");
        record.set(Field::Brand, "Acme");

        let order: Vec<_> = record.iter().map(|(f, _)| f).collect();
        assert_eq!(
            order,
            vec![
                Field::Id,
                Field::Gender,
                Field::Brand,
                Field::Price,
                Field::GoogleProductCategory
            ]
        );
    }

    #[test]
    fn test_field_names_match_feed_tags() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names[1], "item_group_id");
        assert_eq!(names[12], "google_product_category");
        assert!(Field::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serializes_as_flat_json_object() {
        let mut record = ProductRecord::new();
        record.set(Field::ItemGroupId, "AB-12");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["item_group_id"], "AB-12");
        assert_eq!(json["gender"], "female");
    }
}
