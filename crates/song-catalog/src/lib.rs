pub mod browse;
pub mod links;
pub mod loader;
pub mod matcher;
pub mod normalize;
pub mod pagination;
pub mod picks;
pub mod search;

pub use browse::BrowseIndex;
pub use loader::{load_catalog, CatalogSource};
pub use matcher::{JaroWinklerMatcher, TokenMatcher};
pub use normalize::{bucket_of, normalize_artist};
pub use pagination::{Layout, PageState};
pub use search::{SearchHit, SearchIndex, SearchOptions, SearchRecord, SearchResults, SongSearch};

pub use models::{ArtistEntry, Bucket, Catalog, Direction, SongRef};
