//! Caller-owned track cache
//!
//! Generation is pure but not free, and a renderer asks for the same track
//! every frame. The cache is an explicit value the caller owns: keyed by
//! (seed, canvas), bounded, least-recently-used entries evicted first.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::generator::{Canvas, generate_with};
use crate::settings::GeneratorSettings;
use crate::track::Track;

/// Default number of cached tracks
pub const DEFAULT_CAPACITY: usize = 32;

/// Cache key; floats compared by bit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TrackKey {
    seed: String,
    center: [u64; 2],
    size: [u64; 2],
}

impl TrackKey {
    fn new(seed: &str, canvas: &Canvas) -> Self {
        Self {
            seed: seed.to_owned(),
            center: [canvas.center.x.to_bits(), canvas.center.y.to_bits()],
            size: [canvas.width.to_bits(), canvas.height.to_bits()],
        }
    }
}

/// Bounded LRU cache of generated tracks
#[derive(Debug)]
pub struct TrackCache {
    capacity: usize,
    settings: GeneratorSettings,
    entries: HashMap<TrackKey, Arc<Track>>,
    /// Most recently used at the back
    order: VecDeque<TrackKey>,
    hits: u64,
    misses: u64,
}

impl Default for TrackCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TrackCache {
    /// Cache of canonical tracks holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self::with_settings(capacity, GeneratorSettings::default())
    }

    /// Cache that generates every track with `settings`
    pub fn with_settings(capacity: usize, settings: GeneratorSettings) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            settings,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached track for (seed, canvas), generating it on a miss
    pub fn get_or_generate(&mut self, seed: &str, canvas: &Canvas) -> Arc<Track> {
        if let Some(track) = self.get(seed, canvas) {
            return track;
        }
        self.misses += 1;

        let track = Arc::new(generate_with(seed, canvas, &self.settings));
        let key = TrackKey::new(seed, canvas);
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&track));
        track
    }

    /// Cached track, if present; marks it most recently used
    pub fn get(&mut self, seed: &str, canvas: &Canvas) -> Option<Arc<Track>> {
        let key = TrackKey::new(seed, canvas);
        let track = Arc::clone(self.entries.get(&key)?);
        self.hits += 1;
        self.touch(&key);
        Some(track)
    }

    pub fn contains(&self, seed: &str, canvas: &Canvas) -> bool {
        self.entries.contains_key(&TrackKey::new(seed, canvas))
    }

    /// Drop one entry; returns whether it was cached
    pub fn remove(&mut self, seed: &str, canvas: &Canvas) -> bool {
        let key = TrackKey::new(seed, canvas);
        if self.entries.remove(&key).is_some() {
            self.order.retain(|k| k != &key);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn touch(&mut self, key: &TrackKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.entries.remove(&oldest);
            log::debug!("Evicted track {:?} from cache", oldest.seed);
        }
    }
}
