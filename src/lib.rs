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

//! BBS signatures and selective-disclosure zero-knowledge proofs over BLS12-381.
//!
//! An issuer signs an ordered vector of messages with [`signature::BbsSignature::sign`],
//! a holder proves knowledge of that signature while revealing only a chosen
//! subset of the messages with [`proof::BbsProof::proof_gen`], and a verifier
//! checks the presentation with [`proof::BbsProof::proof_verify`]. All
//! operations are generic over a [`ciphersuites::BbsCiphersuite`].

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

pub mod ciphersuites;
pub mod errors;
pub mod generators;
pub mod keys;
pub mod message;
pub mod proof;
pub mod signature;
pub mod utils;
