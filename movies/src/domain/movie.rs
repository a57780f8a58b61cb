//! Canonical movie entity shared by every layer.
//!
//! `Movie` is an immutable value object: it is built once by a mapper and
//! compared by value. Presentation code combines `poster_path` with its own
//! image base URL; the domain never stores absolute poster URLs.

/// A movie as understood by business logic, independent of wire or storage
/// format.
///
/// # Examples
/// ```
/// use movies::domain::Movie;
///
/// let movie = Movie::new(0, "Alien", "In space no one can hear you scream.", "/alien.jpg");
/// assert_eq!(movie.id(), 0);
/// assert_eq!(movie.poster_path(), "/alien.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Movie {
    id: i64,
    title: String,
    description: String,
    poster_path: String,
}

impl Movie {
    /// Build a movie from its parts.
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        poster_path: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            poster_path: poster_path.into(),
        }
    }

    /// Identifier, unique within one fetched collection.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Synopsis text.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Poster path relative to the image host.
    #[must_use]
    pub fn poster_path(&self) -> &str {
        self.poster_path.as_str()
    }
}
