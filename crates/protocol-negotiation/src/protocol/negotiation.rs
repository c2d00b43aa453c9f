//! Protocol registry and best-match selection.

use indexmap::IndexMap;

use crate::config::NegotiatorConfig;
use crate::types::{ProtocolDescriptor, ProtocolSpec};

use super::version::{is_binary_id, precedence};

/// Bonus added to binary candidates when boosting.
///
/// Large enough to lift any realistic version value of a binary protocol
/// above every non-boosted candidate.
pub const DEFAULT_BINARY_BOOST: f64 = 9999.0;

/// Which protocols [`Negotiator::available`] lists.
///
/// Leaving the filter unset and asking to include binary protocols behave the
/// same; only an explicit exclusion filters anything out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinaryFilter {
    /// No preference given: list everything.
    #[default]
    Unset,
    /// Explicitly include binary protocols.
    Include,
    /// Explicitly leave binary protocols out.
    Exclude,
}

impl BinaryFilter {
    fn admits(self, descriptor: &ProtocolDescriptor) -> bool {
        !(self == Self::Exclude && descriptor.is_binary())
    }
}

impl From<bool> for BinaryFilter {
    fn from(include: bool) -> Self {
        if include {
            Self::Include
        } else {
            Self::Exclude
        }
    }
}

impl From<Option<bool>> for BinaryFilter {
    fn from(include: Option<bool>) -> Self {
        include.map_or(Self::Unset, Self::from)
    }
}

/// Registry of locally supported protocols that picks the best mutual match.
///
/// Not internally synchronized; share it across threads behind your own lock.
#[derive(Debug, Clone)]
pub struct Negotiator {
    /// `None` once destroyed.
    protocols: Option<IndexMap<String, ProtocolDescriptor>>,
    binary_boost: f64,
}

impl Default for Negotiator {
    fn default() -> Self {
        Self::new()
    }
}

impl Negotiator {
    /// Create a negotiator with an empty registry and the default boost.
    pub fn new() -> Self {
        Self::with_binary_boost(DEFAULT_BINARY_BOOST)
    }

    /// Create a negotiator with a custom binary boost.
    pub fn with_binary_boost(binary_boost: f64) -> Self {
        Self {
            protocols: Some(IndexMap::new()),
            binary_boost,
        }
    }

    /// Build a negotiator from a loaded configuration, registering its
    /// protocols in file order.
    pub fn from_config(config: &NegotiatorConfig) -> Self {
        let mut negotiator = Self::with_binary_boost(config.binary_boost);
        for entry in &config.protocols {
            negotiator.register(entry.name.clone(), entry.to_spec());
        }
        negotiator
    }

    /// The bonus added to binary candidates when boosting.
    pub fn binary_boost(&self) -> f64 {
        self.binary_boost
    }

    /// Register a protocol under `name`, replacing any earlier registration
    /// with the same derived id.
    pub fn register(&mut self, name: impl Into<String>, spec: ProtocolSpec) -> &mut Self {
        let descriptor = ProtocolDescriptor::new(name, spec);

        match self.protocols.as_mut() {
            Some(protocols) => {
                let id = descriptor.id().to_string();
                if protocols.insert(id.clone(), descriptor).is_some() {
                    tracing::debug!("Replaced protocol {id}");
                } else {
                    tracing::debug!("Registered protocol {id}");
                }
            }
            None => tracing::warn!(
                "Ignoring registration of {} on a destroyed negotiator",
                descriptor.id()
            ),
        }
        self
    }

    /// Look up a registered protocol by id.
    pub fn get(&self, id: &str) -> Option<&ProtocolDescriptor> {
        self.protocols.as_ref()?.get(id)
    }

    /// Whether a protocol with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of registered protocols.
    pub fn len(&self) -> usize {
        self.protocols.as_ref().map_or(0, IndexMap::len)
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ProtocolDescriptor> {
        self.protocols.iter().flat_map(|protocols| protocols.values())
    }

    /// Ids of the protocols we can negotiate, in registration order.
    pub fn available(&self, filter: BinaryFilter) -> Vec<String> {
        self.descriptors()
            .filter(|descriptor| filter.admits(descriptor))
            .map(|descriptor| descriptor.id().to_string())
            .collect()
    }

    /// Pick the best registered protocol among the candidate ids.
    ///
    /// Candidates are ranked by version precedence, highest first; with
    /// `binary_boost` every id carrying `:b` gets the boost added first. The
    /// first ranked candidate we know wins. An empty candidate list falls back
    /// to our own protocols, leaving binary ones out unless boosting.
    pub fn select<I, S>(&self, candidates: I, binary_boost: bool) -> Option<&ProtocolDescriptor>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let protocols = match self.protocols.as_ref() {
            Some(protocols) => protocols,
            None => {
                tracing::warn!("Selection requested on a destroyed negotiator");
                return None;
            }
        };

        let mut ids: Vec<String> = candidates
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        if ids.is_empty() {
            ids = self.available(BinaryFilter::from(binary_boost));
        }

        let mut ranked: Vec<(f64, String)> = ids
            .into_iter()
            .map(|id| (self.rank(&id, binary_boost), id))
            .collect();
        // Stable: equal values keep the caller's order.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        tracing::trace!("Ranked candidates: {ranked:?}");

        let selected = ranked.iter().find_map(|(_, id)| protocols.get(id));
        match selected {
            Some(descriptor) => tracing::debug!("Selected protocol {}", descriptor.id()),
            None => tracing::debug!("No mutually supported protocol found"),
        }
        selected
    }

    /// Select from a single advertised id.
    pub fn select_id(&self, id: &str, binary_boost: bool) -> Option<&ProtocolDescriptor> {
        self.select([id], binary_boost)
    }

    /// Our own best protocol, as if the peer advertised nothing.
    pub fn select_best(&self, binary_boost: bool) -> Option<&ProtocolDescriptor> {
        self.select(std::iter::empty::<&str>(), binary_boost)
    }

    /// Release the registry. Returns `false` if it was already released.
    pub fn destroy(&mut self) -> bool {
        match self.protocols.take() {
            Some(protocols) => {
                tracing::debug!("Destroyed negotiator with {} protocols", protocols.len());
                true
            }
            None => false,
        }
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.protocols.is_none()
    }

    /// Sort key for a candidate id. Unparseable versions rank last.
    fn rank(&self, id: &str, binary_boost: bool) -> f64 {
        let mut value = precedence(id);
        if binary_boost && is_binary_id(id) {
            value += self.binary_boost;
        }
        if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            // Fold -0.0 into 0.0 so total ordering treats them as equal.
            value + 0.0
        }
    }
}
