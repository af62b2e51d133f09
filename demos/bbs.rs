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

mod bbs_example {
    use elliptic_curve::hash2curve::ExpandMsg;
    use zkbbs::{
        ciphersuites::BbsCiphersuite,
        errors::Error,
        keys::KeyPair,
        proof::BbsProof,
        signature::BbsSignature,
        utils::{generate_random_secret, get_messages_vec},
    };

    pub(crate) fn bbs_main<CS>() -> Result<(), Error>
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        const MSGS: [&str; 3] = [
            "9872ad089e452c7b6e283dfac2a80d58e8d0ff71cc4d5e310a1debdda4a45f02",
            "87a8bd656d49ee07b8110e1d8fd4f1dcef6fb9bc368c492d9bc8c4f98a739ac6",
            "96012096adda3f13dd4adbe4eea481a4c4b5717932b73b00e31807d3c5894b90",
        ];

        log::info!("Messages: {:?}", MSGS);

        const HEADER_HEX: &str = "11223344556677889900aabbccddeeff";
        let header = hex::decode(HEADER_HEX).unwrap();

        let key_material = generate_random_secret(CS::IKM_LEN);

        log::info!("Keypair Generation");
        let issuer_keypair = KeyPair::generate::<CS>(&key_material, None, None)?;

        let issuer_sk = issuer_keypair.private_key();
        log::info!("SK: {}", issuer_sk.encode());
        let issuer_pk = issuer_keypair.public_key();
        log::info!("PK: {}", issuer_pk.encode());

        let messages: Vec<Vec<u8>> = MSGS.iter().map(|m| hex::decode(m).unwrap()).collect();

        log::info!("Signature Computation...");
        let signature =
            BbsSignature::sign::<CS>(issuer_sk, issuer_pk, Some(&header), Some(&messages))?;

        assert!(
            signature
                .verify::<CS>(issuer_pk, Some(&header), Some(&messages))
                .is_ok(),
            "Signature verification FAILED!"
        );
        log::info!("Signature is VALID");

        // Holder receives a presentation header from the Verifier
        let ph = generate_random_secret(32);
        log::info!("Presentation header: {}", hex::encode(&ph));

        // first and third attribute revealed, second one kept hidden
        let disclosed_indexes = [1usize, 3usize];

        log::info!("Proof of Knowledge of the Signature Generation...");
        let mut rng = rand::thread_rng();
        let proof = BbsProof::proof_gen::<CS, _>(
            issuer_pk,
            &signature.to_bytes(),
            Some(&header),
            Some(&ph),
            Some(&messages),
            Some(&disclosed_indexes),
            &mut rng,
        )?;

        // Verifier checks the presentation
        let disclosed_messages = get_messages_vec(&messages, &disclosed_indexes);

        log::info!("Proof of Knowledge of the Signature verification...");
        let proof_result = proof
            .proof_verify::<CS>(
                issuer_pk,
                Some(&disclosed_messages),
                Some(&disclosed_indexes),
                Some(&header),
                Some(&ph),
            )
            .is_ok();
        assert!(
            proof_result,
            "Proof of Knowledge of the Signature Verification Failed!"
        );
        log::info!("Proof of Knowledge of the Signature is VALID!");

        Ok(())
    }
}

fn main() {
    use crate::bbs_example::bbs_main;
    use std::env;
    use zkbbs::ciphersuites::{Bls12381Sha256, Bls12381Shake256};

    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!(
            "Usage: {} <cipher_suite>
                Ciphersuites:
                    - BLS12-381-SHA-256
                    - BLS12-381-SHAKE-256",
            args[0]
        );
        return;
    }

    let cipher_suite = &args[1];

    match cipher_suite.as_str() {
        "BLS12-381-SHA-256" => {
            log::info!("Ciphersuite: BLS12-381-SHA-256");
            let _ = bbs_main::<Bls12381Sha256>();
        }
        "BLS12-381-SHAKE-256" => {
            log::info!("Ciphersuite: BLS12-381-SHAKE-256");
            let _ = bbs_main::<Bls12381Shake256>();
        }
        _ => {
            println!("Unknown cipher suite: {}", cipher_suite);
        }
    }
}
