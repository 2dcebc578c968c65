//! # Pelorus Intel
//!
//! Typed clients for the two remote maritime intelligence providers,
//! together with the per-session request-coalescing cache and the bulk
//! vessel prefetch that downstream checks read from.
//!
//! ## Architecture
//!
//! Each client wraps a `reqwest::Client` with the provider's base URL,
//! bearer authentication, and per-endpoint timeouts. Every call is routed
//! through a [`SessionCache`]: identical requests issued by concurrent
//! checks within one screening session coalesce into a single outbound
//! call. [`prefetch_vessel_intel`] warms the cache with all seven provider
//! calls for a vessel at once; evaluators then read decoded responses from
//! the returned [`VesselIntel`] bundle without touching the network.
//!
//! ## Error handling
//!
//! Provider failures are mapped to [`IntelError`] with the endpoint label
//! preserved. An HTTP 403 is surfaced distinctly as `AuthDenied` — a
//! credential or permission problem, not a data miss. Retries cover only
//! transient transport failures (see [`retry`]).

pub mod cache;
pub mod error;
pub mod kpler;
pub mod lloyds;
pub mod prefetch;
pub mod retry;
pub mod types;

pub use cache::{CacheKey, SessionCache};
pub use error::IntelError;
pub use kpler::{KplerClient, KplerConfig};
pub use lloyds::{LloydsClient, LloydsConfig};
pub use prefetch::{prefetch_vessel_intel, Slot, VesselIntel};
