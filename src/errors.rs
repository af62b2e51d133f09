// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

/// Caller precondition violations: protocol length and count bounds.
///
/// These indicate misuse by the caller, never an adversarial input.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("key material shorter than the required minimum")]
    KeyMaterialTooShort,
    #[error("key info longer than 65535 octets")]
    KeyInfoTooLong,
    #[error("domain separation tag longer than 255 octets")]
    DstTooLong,
    #[error("requested expansion longer than 65535 octets")]
    ExpandLengthTooLong,
    #[error("uniform byte expansion failed")]
    ExpandMessageFailed,
    #[error("integer too large for the requested octet length")]
    IntegerTooLarge,
    #[error("wrong number of generators")]
    WrongGeneratorCount,
    #[error("wrong number of random scalars")]
    WrongRandomScalarCount,
}

/// Rejections reachable from adversarial input.
///
/// Deliberately cause-free: a failed decode, a challenge mismatch and a failed
/// pairing check all surface as the same variant, so the caller learns nothing
/// beyond "invalid".
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid secret key")]
    InvalidSecretKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid proof of knowledge of a signature")]
    InvalidProof,
    #[error("invalid disclosed indexes")]
    InvalidDisclosedIndexes,
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
