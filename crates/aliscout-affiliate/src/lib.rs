mod client;
mod error;
mod response;
mod signer;
mod verifier;

pub use client::{AffiliateClient, PRODUCT_QUERY_METHOD, RawResponse, TokenGrant};
pub use error::AffiliateError;
pub use response::{extract_products, upstream_error};
pub use signer::{ParamValue, SIGN_PARAM, SignatureRequest, Signer, sign};
pub use verifier::{NoVerification, ProbeVerifier, RefreshVerifier, TokenVerifier, verifier_for};
