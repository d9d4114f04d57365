// src/data.rs
//
// Typed shapes for one run:
//
// - ListingRecord: one scraped listing, all four fields mandatory.
// - ListingTable:  deduplicated rows under the fixed schema. Only
//                  `normalize` builds a non-empty one.

/// Column names of every `ListingTable`, in order.
pub const SCHEMA: [&str; 4] = ["Title", "Author", "Price", "Rating"];

/// One listing as found on a results page.
///
/// `price` and `rating` are kept as displayed (`"24."`, `"4.5 out of 5 stars"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListingRecord {
    pub title: String,
    pub author: String,
    pub price: String,
    pub rating: String,
}

impl ListingRecord {
    /// Trim every field. `None` when the trimmed title is empty.
    pub fn new(title: &str, author: &str, price: &str, rating: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: s!(title),
            author: s!(author.trim()),
            price: s!(price.trim()),
            rating: s!(rating.trim()),
        })
    }

    /// Build from optionally located fields; any `None` drops the record.
    pub fn from_parts(
        title: Option<String>,
        author: Option<String>,
        price: Option<String>,
        rating: Option<String>,
    ) -> Option<Self> {
        Self::new(&title?, &author?, &price?, &rating?)
    }

    /// Cells in `SCHEMA` order.
    pub fn cells(&self) -> [&str; 4] {
        [&self.title, &self.author, &self.price, &self.rating]
    }
}

/// Deduplicated listings with the fixed four-column schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingTable {
    rows: Vec<ListingRecord>,
}

impl ListingTable {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Caller guarantees title uniqueness; see `normalize::normalize`.
    pub(crate) fn from_unique(rows: Vec<ListingRecord>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str; 4] {
        &SCHEMA
    }

    pub fn rows(&self) -> &[ListingRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.rows.iter()
    }

    pub fn into_records(self) -> Vec<ListingRecord> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a ListingTable {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
