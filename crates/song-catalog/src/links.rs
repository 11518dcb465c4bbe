use models::SongRef;

pub const VIDEO_SEARCH_BASE_URL: &str = "https://www.youtube.com/results?search_query=";

/// Video search link for `"<artist> <title>"`.
pub fn video_search_url(artist: &str, title: &str) -> String {
    let query = format!("{artist} {title}");
    format!("{VIDEO_SEARCH_BASE_URL}{}", urlencoding::encode(&query))
}

pub fn song_ref(artist: &str, title: &str) -> SongRef {
    SongRef {
        artist: artist.to_string(),
        title: title.to_string(),
        url: video_search_url(artist, title),
    }
}
