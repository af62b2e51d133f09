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

#![allow(non_snake_case)]

#[cfg(test)]
mod bbs_tests {

    use elliptic_curve::hash2curve::ExpandMsg;
    use rand::{rngs::StdRng, SeedableRng};
    use zkbbs::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256};
    use zkbbs::keys::KeyPair;
    use zkbbs::proof::BbsProof;
    use zkbbs::signature::BbsSignature;
    use zkbbs::utils::get_messages_vec;

    const HEADER: &[u8] = b"11223344556677889900aabbccddeeff";
    const PH: &[u8] = b"bed231d880675ed101ead304512e0450";

    fn test_messages(count: usize) -> Vec<Vec<u8>> {
        (0..count)
            .map(|i| format!("attribute-{}", i).into_bytes())
            .collect()
    }

    fn test_keypair<CS>(seed: u8) -> KeyPair
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        KeyPair::generate::<CS>(&[seed; 32], None, None).unwrap()
    }

    fn signed<CS>(count: usize) -> (KeyPair, Vec<Vec<u8>>, BbsSignature)
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let keypair = test_keypair::<CS>(42);
        let messages = test_messages(count);
        let signature = BbsSignature::sign::<CS>(
            keypair.private_key(),
            keypair.public_key(),
            Some(HEADER),
            Some(&messages),
        )
        .unwrap();
        (keypair, messages, signature)
    }

    fn sign_verify_round_trip<CS>(count: usize)
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let (keypair, messages, signature) = signed::<CS>(count);
        assert!(signature
            .verify::<CS>(keypair.public_key(), Some(HEADER), Some(&messages))
            .is_ok());
    }

    #[test]
    fn sign_verify_shake256() {
        sign_verify_round_trip::<Bls12381Shake256>(1);
        sign_verify_round_trip::<Bls12381Shake256>(5);
        sign_verify_round_trip::<Bls12381Shake256>(10);
    }

    #[test]
    fn sign_verify_sha256() {
        sign_verify_round_trip::<Bls12381Sha256>(1);
        sign_verify_round_trip::<Bls12381Sha256>(5);
    }

    #[test]
    fn sign_verify_empty_message_vector() {
        let keypair = test_keypair::<Bls12381Shake256>(42);
        let signature = BbsSignature::sign::<Bls12381Shake256>(
            keypair.private_key(),
            keypair.public_key(),
            Some(HEADER),
            None,
        )
        .unwrap();
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(HEADER), None)
            .is_ok());
    }

    #[test]
    fn verify_rejects_altered_message() {
        let (keypair, mut messages, signature) = signed::<Bls12381Shake256>(5);
        messages[2] = b"tampered".to_vec();
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(HEADER), Some(&messages))
            .is_err());
    }

    #[test]
    fn verify_rejects_reordered_messages() {
        let (keypair, mut messages, signature) = signed::<Bls12381Shake256>(5);
        messages.swap(0, 4);
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(HEADER), Some(&messages))
            .is_err());
    }

    #[test]
    fn verify_rejects_added_message() {
        let (keypair, mut messages, signature) = signed::<Bls12381Shake256>(5);
        messages.push(b"extra".to_vec());
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(HEADER), Some(&messages))
            .is_err());
    }

    #[test]
    fn verify_rejects_removed_message() {
        let (keypair, mut messages, signature) = signed::<Bls12381Shake256>(5);
        messages.pop();
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(HEADER), Some(&messages))
            .is_err());
    }

    #[test]
    fn verify_rejects_altered_header() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(5);
        assert!(signature
            .verify::<Bls12381Shake256>(keypair.public_key(), Some(b"other header"), Some(&messages))
            .is_err());
    }

    #[test]
    fn verify_rejects_substituted_public_key() {
        let (_, messages, signature) = signed::<Bls12381Shake256>(5);
        let other = test_keypair::<Bls12381Shake256>(43);
        assert!(signature
            .verify::<Bls12381Shake256>(other.public_key(), Some(HEADER), Some(&messages))
            .is_err());
    }

    fn proof_round_trip<CS>(count: usize, disclosed_indexes: &[usize])
    where
        CS: BbsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        let (keypair, messages, signature) = signed::<CS>(count);
        let mut rng = StdRng::seed_from_u64(0xb0b);

        let proof = BbsProof::proof_gen::<CS, _>(
            keypair.public_key(),
            &signature.to_bytes(),
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(disclosed_indexes),
            &mut rng,
        )
        .unwrap();

        let disclosed_messages = get_messages_vec(&messages, disclosed_indexes);
        assert!(proof
            .proof_verify::<CS>(
                keypair.public_key(),
                Some(&disclosed_messages),
                Some(disclosed_indexes),
                Some(HEADER),
                Some(PH),
            )
            .is_ok());
    }

    #[test]
    fn proof_round_trip_partial_disclosure_shake256() {
        proof_round_trip::<Bls12381Shake256>(5, &[1, 3, 5]);
    }

    #[test]
    fn proof_round_trip_partial_disclosure_sha256() {
        proof_round_trip::<Bls12381Sha256>(5, &[1, 3, 5]);
    }

    #[test]
    fn proof_round_trip_nothing_disclosed() {
        proof_round_trip::<Bls12381Shake256>(5, &[]);
    }

    #[test]
    fn proof_round_trip_everything_disclosed() {
        proof_round_trip::<Bls12381Shake256>(5, &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn proof_round_trip_single_message() {
        proof_round_trip::<Bls12381Shake256>(1, &[1]);
    }

    #[test]
    fn proofs_over_the_same_signature_differ() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(5);
        let mut rng = StdRng::seed_from_u64(7);

        let present = |rng: &mut StdRng| {
            BbsProof::proof_gen::<Bls12381Shake256, _>(
                keypair.public_key(),
                &signature.to_bytes(),
                Some(HEADER),
                Some(PH),
                Some(&messages),
                Some(&[2, 4]),
                rng,
            )
            .unwrap()
        };

        // fresh ephemeral randomness per presentation
        assert_ne!(present(&mut rng).to_bytes(), present(&mut rng).to_bytes());
    }

    #[test]
    fn proof_verify_rejects_altered_disclosed_message() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(5);
        let mut rng = StdRng::seed_from_u64(1);
        let disclosed_indexes = [1usize, 3];

        let proof = BbsProof::proof_gen::<Bls12381Shake256, _>(
            keypair.public_key(),
            &signature.to_bytes(),
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(&disclosed_indexes),
            &mut rng,
        )
        .unwrap();

        let mut disclosed_messages = get_messages_vec(&messages, &disclosed_indexes);
        disclosed_messages[0] = b"forged".to_vec();

        assert!(proof
            .proof_verify::<Bls12381Shake256>(
                keypair.public_key(),
                Some(&disclosed_messages),
                Some(&disclosed_indexes),
                Some(HEADER),
                Some(PH),
            )
            .is_err());
    }

    #[test]
    fn proof_verify_rejects_shifted_index_set() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(5);
        let mut rng = StdRng::seed_from_u64(2);
        let disclosed_indexes = [1usize, 3];

        let proof = BbsProof::proof_gen::<Bls12381Shake256, _>(
            keypair.public_key(),
            &signature.to_bytes(),
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(&disclosed_indexes),
            &mut rng,
        )
        .unwrap();

        let disclosed_messages = get_messages_vec(&messages, &disclosed_indexes);

        // same messages presented under different positions
        assert!(proof
            .proof_verify::<Bls12381Shake256>(
                keypair.public_key(),
                Some(&disclosed_messages),
                Some(&[2usize, 4]),
                Some(HEADER),
                Some(PH),
            )
            .is_err());
    }

    #[test]
    fn proof_verify_rejects_wrong_presentation_header() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(5);
        let mut rng = StdRng::seed_from_u64(3);
        let disclosed_indexes = [2usize];

        let proof = BbsProof::proof_gen::<Bls12381Shake256, _>(
            keypair.public_key(),
            &signature.to_bytes(),
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(&disclosed_indexes),
            &mut rng,
        )
        .unwrap();

        let disclosed_messages = get_messages_vec(&messages, &disclosed_indexes);

        assert!(proof
            .proof_verify::<Bls12381Shake256>(
                keypair.public_key(),
                Some(&disclosed_messages),
                Some(&disclosed_indexes),
                Some(HEADER),
                Some(b"another ph"),
            )
            .is_err());
    }

    #[test]
    fn proof_gen_rejects_out_of_range_indexes() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(3);
        let mut rng = StdRng::seed_from_u64(4);

        for indexes in [&[0usize][..], &[4usize][..], &[1, 2, 3, 4][..]] {
            assert!(BbsProof::proof_gen::<Bls12381Shake256, _>(
                keypair.public_key(),
                &signature.to_bytes(),
                Some(HEADER),
                Some(PH),
                Some(&messages),
                Some(indexes),
                &mut rng,
            )
            .is_err());
        }
    }

    #[test]
    fn proof_gen_rejects_malformed_signature() {
        let keypair = test_keypair::<Bls12381Shake256>(42);
        let messages = test_messages(3);
        let mut rng = StdRng::seed_from_u64(5);

        assert!(BbsProof::proof_gen::<Bls12381Shake256, _>(
            keypair.public_key(),
            &[0u8; 80],
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(&[1]),
            &mut rng,
        )
        .is_err());
    }

    #[test]
    fn proof_octets_round_trip() {
        let (keypair, messages, signature) = signed::<Bls12381Shake256>(4);
        let mut rng = StdRng::seed_from_u64(6);
        let disclosed_indexes = [2usize, 3];

        let proof = BbsProof::proof_gen::<Bls12381Shake256, _>(
            keypair.public_key(),
            &signature.to_bytes(),
            Some(HEADER),
            Some(PH),
            Some(&messages),
            Some(&disclosed_indexes),
            &mut rng,
        )
        .unwrap();

        let octets = proof.to_bytes();
        // two undisclosed messages
        assert_eq!(octets.len(), BbsProof::LEN_FLOOR + 2 * 32);

        let decoded = BbsProof::from_bytes(&octets).unwrap();
        assert_eq!(decoded, proof);

        let disclosed_messages = get_messages_vec(&messages, &disclosed_indexes);
        assert!(decoded
            .proof_verify::<Bls12381Shake256>(
                keypair.public_key(),
                Some(&disclosed_messages),
                Some(&disclosed_indexes),
                Some(HEADER),
                Some(PH),
            )
            .is_ok());
    }

    #[test]
    fn proof_verify_never_panics_on_garbage() {
        let keypair = test_keypair::<Bls12381Shake256>(42);

        for len in [0usize, 1, 100, BbsProof::LEN_FLOOR, BbsProof::LEN_FLOOR + 32] {
            let garbage = vec![0xa5u8; len];
            match BbsProof::from_bytes(&garbage) {
                Ok(proof) => {
                    assert!(proof
                        .proof_verify::<Bls12381Shake256>(
                            keypair.public_key(),
                            None,
                            None,
                            Some(HEADER),
                            Some(PH),
                        )
                        .is_err());
                }
                Err(_) => {}
            }
        }
    }

    #[test]
    fn signature_serde_json_round_trip() {
        let (_, _, signature) = signed::<Bls12381Shake256>(2);
        let json = serde_json::to_string(&signature).unwrap();
        let decoded: BbsSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, signature);
    }
}
