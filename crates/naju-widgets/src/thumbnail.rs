#![forbid(unsafe_code)]

//! Derived preview images, memoised per record, file, size and theme.
//!
//! A cache miss renders a transparent RGBA frame of the requested size,
//! replaces it with the decoded photo stretched to fill the frame when the
//! file resolves and decodes, then darkens the result with a constant black
//! overlay. Hits hand back the same [`Arc`], so identity can be compared.
//!
//! # Invariants
//!
//! 1. `get` twice with the same key returns the same allocation.
//! 2. After `invalidate(record)` no entry of that record remains, and the
//!    record's generation stamp has increased.
//! 3. Loading never fails from the caller's point of view: unreadable or
//!    undecodable files degrade to the empty frame.
//!
//! # Failure Modes
//!
//! - Missing file or resolver miss: transparent frame plus overlay.
//! - I/O or decode error: same, with a warning when tracing is enabled.
//! - Zero width or height: treated as 1.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use naju_style::{Rgb, Theme, ThemeId};

/// Alpha of the black overlay composited over every thumbnail.
pub const OVERLAY_ALPHA: u8 = 30;

/// Side of the square profile picture.
pub const PROFILE_PHOTO_SIDE: u32 = 140;

/// Text drawn on the profile picture placeholder.
pub const PLACEHOLDER_LABEL: &str = "SIN\nFOTO";

// ---------------------------------------------------------------------------
// Collaborator seam
// ---------------------------------------------------------------------------

/// Maps a record's photo file name to a path on disk.
pub trait PhotoResolver<R> {
    /// Resolve `file` inside `record`'s storage, if it exists.
    fn resolve_photo(&self, record: &R, file: &str) -> Option<PathBuf>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a photo could not be loaded. Always degraded, never surfaced.
#[derive(Debug)]
pub enum ThumbnailError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The bytes are not a supported image.
    Decode(image::ImageError),
}

impl From<std::io::Error> for ThumbnailError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for ThumbnailError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err)
    }
}

impl fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "photo read error: {err}"),
            Self::Decode(err) => write!(f, "photo decode error: {err}"),
        }
    }
}

impl std::error::Error for ThumbnailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

/// Decode the image at `path` and stretch it to exactly `width × height`.
pub fn load_fill(path: &Path, width: u32, height: u32) -> Result<RgbaImage, ThumbnailError> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image
        .resize_exact(width.max(1), height.max(1), FilterType::Triangle)
        .to_rgba8())
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Cache key: one derived image per record, file, size and theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey<R> {
    /// Owning record.
    pub record: R,
    /// Source file name inside the record.
    pub file: String,
    /// Requested width.
    pub width: u32,
    /// Requested height.
    pub height: u32,
    /// Palette the image was derived for.
    pub theme: ThemeId,
}

/// Diagnostic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that rendered a new image.
    pub misses: u64,
    /// Entries removed by invalidation.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct Entry {
    image: Arc<RgbaImage>,
    generation: u64,
}

/// Unbounded memo of derived thumbnails.
#[derive(Debug)]
pub struct ThumbnailCache<R> {
    entries: HashMap<CacheKey<R>, Entry>,
    generations: HashMap<R, u64>,
    stats: CacheStats,
}

impl<R> Default for ThumbnailCache<R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generations: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

impl<R: Clone + Eq + Hash + fmt::Debug> ThumbnailCache<R> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or render the thumbnail for `key`'s fields.
    pub fn get<P>(
        &mut self,
        resolver: &P,
        record: &R,
        file: &str,
        width: u32,
        height: u32,
        theme: ThemeId,
    ) -> Arc<RgbaImage>
    where
        P: PhotoResolver<R> + ?Sized,
    {
        let key = CacheKey {
            record: record.clone(),
            file: file.to_string(),
            width,
            height,
            theme,
        };
        if let Some(entry) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Arc::clone(&entry.image);
        }
        self.stats.misses += 1;
        let image = Arc::new(render_thumbnail(resolver, record, file, width, height));
        let generation = self.generation(record);
        self.entries.insert(
            key,
            Entry {
                image: Arc::clone(&image),
                generation,
            },
        );
        image
    }

    /// Drop every entry of `record` and bump its generation. Returns the
    /// number of entries removed.
    pub fn invalidate(&mut self, record: &R) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| &key.record != record);
        let removed = before - self.entries.len();
        self.stats.evictions += removed as u64;
        *self.generations.entry(record.clone()).or_insert(0) += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(record = ?record, removed, "thumbnails invalidated");
        removed
    }

    /// Current generation stamp of `record`.
    #[must_use]
    pub fn generation(&self, record: &R) -> u64 {
        self.generations.get(record).copied().unwrap_or(0)
    }

    /// Generation an entry was rendered at, if cached.
    #[must_use]
    pub fn entry_generation(&self, key: &CacheKey<R>) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.generation)
    }

    /// Number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostic counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Render a thumbnail without caching.
pub fn render_thumbnail<R, P>(resolver: &P, record: &R, file: &str, width: u32, height: u32) -> RgbaImage
where
    R: fmt::Debug,
    P: PhotoResolver<R> + ?Sized,
{
    let (width, height) = (width.max(1), height.max(1));
    let mut base = RgbaImage::new(width, height);
    if !file.is_empty()
        && let Some(path) = resolver.resolve_photo(record, file)
    {
        match load_fill(&path, width, height) {
            Ok(photo) => base = photo,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(record = ?record, file, error = %_err, "thumbnail source unreadable");
            }
        }
    }
    darken(&mut base, OVERLAY_ALPHA);
    base
}

/// Composite a black layer of constant `alpha` over every pixel.
pub fn darken(image: &mut RgbaImage, alpha: u8) {
    let sa = u32::from(alpha);
    for Rgba([r, g, b, a]) in image.pixels_mut() {
        let da = u32::from(*a);
        let keep = da * (255 - sa);
        let out_a = sa * 255 + keep;
        if out_a == 0 {
            continue;
        }
        let channel = |c: u8| ((u32::from(c) * keep + out_a / 2) / out_a) as u8;
        *r = channel(*r);
        *g = channel(*g);
        *b = channel(*b);
        *a = ((out_a + 127) / 255) as u8;
    }
}

// ---------------------------------------------------------------------------
// Profile photo
// ---------------------------------------------------------------------------

/// The profile picture, or what to draw in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilePhoto {
    /// The decoded photo at [`PROFILE_PHOTO_SIDE`] square.
    Image(RgbaImage),
    /// No usable photo.
    Placeholder {
        /// Frame fill.
        fill: Rgb,
        /// Label color.
        text: Rgb,
        /// Label, [`PLACEHOLDER_LABEL`].
        label: &'static str,
    },
}

impl ProfilePhoto {
    /// Placeholder painted from `theme`.
    #[must_use]
    pub fn placeholder(theme: &Theme) -> Self {
        Self::Placeholder {
            fill: theme.card2,
            text: theme.muted,
            label: PLACEHOLDER_LABEL,
        }
    }

    /// Whether this is the placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Load the profile picture for `record`, falling back to the placeholder
/// when there is no photo or it cannot be decoded.
pub fn profile_photo<R, P>(resolver: &P, record: &R, photo: Option<&str>, theme: &Theme) -> ProfilePhoto
where
    R: fmt::Debug,
    P: PhotoResolver<R> + ?Sized,
{
    let Some(file) = photo.map(str::trim).filter(|f| !f.is_empty()) else {
        return ProfilePhoto::placeholder(theme);
    };
    let Some(path) = resolver.resolve_photo(record, file) else {
        return ProfilePhoto::placeholder(theme);
    };
    match load_fill(&path, PROFILE_PHOTO_SIDE, PROFILE_PHOTO_SIDE) {
        Ok(image) => ProfilePhoto::Image(image),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(record = ?record, file, error = %_err, "profile photo unreadable");
            ProfilePhoto::placeholder(theme)
        }
    }
}
