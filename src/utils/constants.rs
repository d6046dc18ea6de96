/// Parameter keys that name the on-chain instance behind a pool record, in priority order.
/// The first one present becomes the pool-node identity.
pub const IDENTITY_PARAM_KEYS: [&str; 5] = ["target", "pool", "vault", "lpToken", "router"];

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// `k = 0` lists every path.
pub const UNLIMITED_PATHS: usize = 0;
