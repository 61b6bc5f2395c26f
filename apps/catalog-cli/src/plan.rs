//! The fixed work of one catalog run.

use catalog_core::NewAlbum;

/// Album fetched by id unless `CATALOG_FEATURED_ALBUM_ID` overrides it.
pub const FEATURED_ALBUM_ID: i64 = 9;

/// Albums inserted on every run, in order.
pub fn literal_albums() -> Vec<NewAlbum> {
    vec![
        NewAlbum::new("Still Bill", "Bill Withers", 56.99),
        NewAlbum::new("Black on Both Sides", "Mos Def", 32.99),
        NewAlbum::new("Capital Punishment", "Big Pun", 19.99),
        NewAlbum::new("The Low End Theory", "A Tribe Called Quest", 29.99),
        NewAlbum::new("The Shape of Jazz to Come", "Ornette Coleman", 39.99),
        NewAlbum::new("The Blueprint", "Jay-Z", 24.99),
    ]
}

/// What a run fetches and inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub featured_id: i64,
    pub albums: Vec<NewAlbum>,
}

impl Default for RunPlan {
    fn default() -> Self {
        RunPlan {
            featured_id: FEATURED_ALBUM_ID,
            albums: literal_albums(),
        }
    }
}

impl RunPlan {
    /// Replaces the featured album id.
    pub fn with_featured_id(mut self, id: i64) -> Self {
        self.featured_id = id;
        self
    }
}
