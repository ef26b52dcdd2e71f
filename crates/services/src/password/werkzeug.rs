//! Hashes written by werkzeug's `generate_password_hash`:
//! `pbkdf2:<digest>[:<iterations>]$<salt>$<hex>` and `scrypt[:n:r:p]$<salt>$<hex>`.

use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha512};

const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;
const DEFAULT_SCRYPT_N: u64 = 1 << 15;
const DEFAULT_SCRYPT_R: u32 = 8;
const DEFAULT_SCRYPT_P: u32 = 1;

pub(super) fn is_werkzeug(hash: &str) -> bool {
    hash.starts_with("pbkdf2:") || hash.starts_with("scrypt")
}

/// Unknown methods or malformed fields never match.
pub(super) fn verify(password: &str, hash: &str) -> bool {
    let mut parts = hash.splitn(3, '$');
    let (Some(method), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }
    derive(method, password.as_bytes(), salt.as_bytes(), expected.len())
        .is_some_and(|actual| constant_time_eq(&actual, &expected))
}

fn derive(method: &str, password: &[u8], salt: &[u8], len: usize) -> Option<Vec<u8>> {
    let mut fields = method.split(':');
    let mut out = vec![0u8; len];
    match fields.next()? {
        "pbkdf2" => {
            let digest = fields.next().unwrap_or("sha256");
            let iterations = match fields.next() {
                Some(raw) => raw.parse().ok()?,
                None => DEFAULT_PBKDF2_ITERATIONS,
            };
            match digest {
                "sha256" => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out),
                "sha512" => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out),
                _ => return None,
            }
        }
        "scrypt" => {
            let n: u64 = fields.next().map_or(Some(DEFAULT_SCRYPT_N), |raw| raw.parse().ok())?;
            let r: u32 = fields.next().map_or(Some(DEFAULT_SCRYPT_R), |raw| raw.parse().ok())?;
            let p: u32 = fields.next().map_or(Some(DEFAULT_SCRYPT_P), |raw| raw.parse().ok())?;
            if !n.is_power_of_two() || n < 2 {
                return None;
            }
            let log_n = u8::try_from(n.trailing_zeros()).ok()?;
            let params = scrypt::Params::new(log_n, r, p, len).ok()?;
            scrypt::scrypt(password, salt, &params, &mut out).ok()?;
        }
        _ => return None,
    }
    Some(out)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
