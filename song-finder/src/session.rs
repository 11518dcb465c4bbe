use models::{Bucket, Catalog, Direction, SongRef};
use rand::Rng;
use serde::Serialize;
use song_catalog::links::song_ref;
use song_catalog::picks::{self, DEFAULT_PICK_COUNT};
use song_catalog::{
    normalize_artist, BrowseIndex, Layout, PageState, SearchIndex, SearchOptions, SearchResults,
    SongSearch,
};
use tracing::{debug, info};

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_RESULT_CAP: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub viewport_width: u32,
    pub layout: Layout,
    pub search: SearchOptions,
    pub result_cap: usize,
    pub pick_count: usize,
    /// Bucket opened right after the catalog loads, if any.
    pub default_bucket: Option<Bucket>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            layout: Layout::default(),
            search: SearchOptions::default(),
            result_cap: DEFAULT_RESULT_CAP,
            pick_count: DEFAULT_PICK_COUNT,
            default_bucket: None,
        }
    }
}

/// Which panel is showing.
#[derive(Debug, Clone, PartialEq)]
enum View {
    Unavailable,
    NoSelection,
    ArtistGrid,
    SongList { artist: usize },
    SearchResults { query: String, results: SearchResults },
    Picks { songs: Vec<SongRef> },
}

/// Render model for one panel state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum Screen {
    /// The catalog failed to load; nothing is browsable.
    Unavailable,
    NoSelection {
        buckets: Vec<BucketCount>,
    },
    ArtistGrid(ArtistGridScreen),
    NoArtists {
        bucket: Bucket,
    },
    SongList(SongListScreen),
    SearchResults(ResultsScreen),
    Picks(ResultsScreen),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: Bucket,
    pub artists: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistItem {
    /// Position in the catalog, stable across pages.
    pub index: usize,
    pub name: String,
    pub songs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistGridScreen {
    pub bucket: Bucket,
    pub columns: usize,
    pub artists: Vec<ArtistItem>,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongListScreen {
    pub artist: String,
    pub songs: Vec<SongRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsScreen {
    pub query: Option<String>,
    pub songs: Vec<SongRef>,
    /// Matches beyond the display cap.
    pub remaining: usize,
}

/// One user's browse/search state over a loaded catalog.
///
/// Every event mutates the state and then renders the resulting panel through
/// [`Session::screen`].
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    search: SearchIndex,
    browse: BrowseIndex,
    options: SessionOptions,
    page: PageState,
    active_bucket: Option<Bucket>,
    view: View,
}

impl Session {
    pub fn new(catalog: Catalog, options: SessionOptions) -> Self {
        let search = SearchIndex::new(&catalog, options.search);
        let browse = BrowseIndex::new(&catalog);
        let page = PageState::new(options.layout.items_per_page(options.viewport_width));
        info!(
            artists = catalog.len(),
            songs = catalog.song_count(),
            items_per_page = page.items_per_page(),
            "session ready"
        );

        let mut session = Self {
            catalog,
            search,
            browse,
            options,
            page,
            active_bucket: None,
            view: View::NoSelection,
        };
        if let Some(bucket) = session.options.default_bucket {
            session.letter_selected(bucket);
        }
        session
    }

    /// Session for a catalog that could not be loaded; every event is inert.
    pub fn unavailable(options: SessionOptions) -> Self {
        let mut session = Self::new(
            Catalog::empty(),
            SessionOptions {
                default_bucket: None,
                ..options
            },
        );
        session.view = View::Unavailable;
        session
    }

    pub fn is_available(&self) -> bool {
        self.view != View::Unavailable
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn active_bucket(&self) -> Option<Bucket> {
        self.active_bucket
    }

    pub fn query_submitted(&mut self, text: &str) -> Screen {
        if !self.is_available() {
            return Screen::Unavailable;
        }
        let query = text.trim().to_string();
        let hits = self.search.search(&query);
        let results = SearchResults::capped(hits, self.options.result_cap);
        debug!(query = %query, total = results.total(), "query submitted");
        self.view = View::SearchResults { query, results };
        self.screen()
    }

    pub fn random_picks<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Screen {
        if !self.is_available() {
            return Screen::Unavailable;
        }
        let songs = picks::random_picks(self.search.records(), self.options.pick_count, rng)
            .into_iter()
            .map(|record| record.song_ref())
            .collect();
        self.view = View::Picks { songs };
        self.screen()
    }

    /// Opens a bucket's artist grid on page 1.
    pub fn letter_selected(&mut self, bucket: Bucket) -> Screen {
        if !self.is_available() {
            return Screen::Unavailable;
        }
        self.active_bucket = Some(bucket);
        self.page.reset();
        self.view = View::ArtistGrid;
        debug!(
            %bucket,
            artists = self.browse.artists_for(bucket).len(),
            "letter selected"
        );
        self.screen()
    }

    /// Shows the song list of the artist at catalog position `index`.
    pub fn artist_selected(&mut self, index: usize) -> Option<Screen> {
        if !self.is_available() {
            return Some(Screen::Unavailable);
        }
        self.catalog.get(index)?;
        self.view = View::SongList { artist: index };
        Some(self.screen())
    }

    pub fn page_changed(&mut self, direction: Direction) -> Screen {
        if self.view == View::ArtistGrid {
            let count = self.bucket_artists().len();
            let moved = match direction {
                Direction::Next => self.page.next(count),
                Direction::Prev => self.page.prev(),
            };
            debug!(%direction, moved, page = self.page.current_page(), "page changed");
        }
        self.screen()
    }

    /// Jumps straight to a grid page, clamped to the pages that exist.
    pub fn page_selected(&mut self, page: usize) -> Screen {
        if self.view == View::ArtistGrid {
            let count = self.bucket_artists().len();
            self.page.go_to(page, count);
        }
        self.screen()
    }

    /// Recomputes the page size for a new viewport width and clamps the current page.
    pub fn viewport_resized(&mut self, width: u32) -> Screen {
        self.options.viewport_width = width;
        let count = self.bucket_artists().len();
        self.page.resize(self.options.layout.items_per_page(width), count);
        debug!(
            width,
            items_per_page = self.page.items_per_page(),
            page = self.page.current_page(),
            "viewport resized"
        );
        self.screen()
    }

    /// Leaves the song list for the grid it was opened from.
    pub fn close_song_list(&mut self) -> Screen {
        if matches!(self.view, View::SongList { .. }) {
            self.view = if self.active_bucket.is_some() {
                View::ArtistGrid
            } else {
                View::NoSelection
            };
        }
        self.screen()
    }

    /// Finds an artist by its position on the visible grid page (1-based),
    /// or by authored or normalized name ignoring case.
    pub fn resolve_artist(&self, input: &str) -> Option<usize> {
        let input = input.trim();
        if self.view == View::ArtistGrid {
            if let Ok(position) = input.parse::<usize>() {
                let visible = self.page.slice(self.bucket_artists());
                if let Some(&index) = position.checked_sub(1).and_then(|p| visible.get(p)) {
                    return Some(index);
                }
            }
        }

        self.catalog.position_of(input).or_else(|| {
            self.catalog.entries().iter().position(|e| {
                e.name.eq_ignore_ascii_case(input)
                    || normalize_artist(&e.name).eq_ignore_ascii_case(input)
            })
        })
    }

    /// Renders the current panel.
    pub fn screen(&self) -> Screen {
        match &self.view {
            View::Unavailable => Screen::Unavailable,
            View::NoSelection => Screen::NoSelection {
                buckets: self
                    .browse
                    .bucket_counts()
                    .into_iter()
                    .map(|(bucket, artists)| BucketCount { bucket, artists })
                    .collect(),
            },
            View::ArtistGrid => self.grid_screen(),
            View::SongList { artist } => self.song_list_screen(*artist),
            View::SearchResults { query, results } => Screen::SearchResults(ResultsScreen {
                query: Some(query.clone()),
                songs: results
                    .shown
                    .iter()
                    .map(|hit| song_ref(&hit.artist, &hit.title))
                    .collect(),
                remaining: results.remaining,
            }),
            View::Picks { songs } => Screen::Picks(ResultsScreen {
                query: None,
                songs: songs.clone(),
                remaining: 0,
            }),
        }
    }

    fn bucket_artists(&self) -> &[usize] {
        match self.active_bucket {
            Some(bucket) => self.browse.artists_for(bucket),
            None => &[],
        }
    }

    fn grid_screen(&self) -> Screen {
        let Some(bucket) = self.active_bucket else {
            return Screen::NoSelection {
                buckets: Vec::new(),
            };
        };
        let artists = self.bucket_artists();
        if artists.is_empty() {
            return Screen::NoArtists { bucket };
        }

        let items = self
            .page
            .slice(artists)
            .iter()
            .filter_map(|&index| {
                let entry = self.catalog.get(index)?;
                Some(ArtistItem {
                    index,
                    name: normalize_artist(&entry.name),
                    songs: entry.titles.len(),
                })
            })
            .collect();

        Screen::ArtistGrid(ArtistGridScreen {
            bucket,
            columns: self.options.layout.columns(self.options.viewport_width),
            artists: items,
            page: self.page.current_page(),
            total_pages: self.page.total_pages(artists.len()),
            has_prev: self.page.has_prev(),
            has_next: self.page.has_next(artists.len()),
        })
    }

    fn song_list_screen(&self, index: usize) -> Screen {
        let Some(entry) = self.catalog.get(index) else {
            return Screen::Unavailable;
        };
        let artist = normalize_artist(&entry.name);
        let songs = entry
            .titles
            .iter()
            .map(|title| song_ref(&artist, title))
            .collect();
        Screen::SongList(SongListScreen { artist, songs })
    }
}
