//! End-to-end scenarios: distributed key generation followed by the full
//! issuance and presentation pipeline.

use ark_bls12_381::{Bls12_381, Fr};
use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{
    rand::{prelude::SliceRandom, rngs::StdRng, SeedableRng},
    vec::Vec,
};

use crate::{
    did::Did,
    dkg::{keys::tests::run_dkg, AuthorityKeys, MasterVerificationKey, ParticipantId},
    error::CredentialError,
    proof::Presentation,
    setup::SignatureParams,
    signature::{BlindSignRequest, BlindSignature, Credential, PartialSignature},
};

fn issue(
    rng: &mut StdRng,
    params: &SignatureParams<Bls12_381>,
    authorities: &[&AuthorityKeys<Bls12_381>],
    threshold: ParticipantId,
    did: &Fr,
) -> (
    BlindSignRequest<Bls12_381>,
    Fr,
    Credential<Bls12_381>,
) {
    let (request, o) = BlindSignRequest::new(rng, params, did).unwrap();

    let partials = authorities
        .iter()
        .map(|keys| {
            let blind = BlindSignature::new(&request, &keys.signing, params).unwrap();
            PartialSignature::new(&blind, &request, &keys.verification, did, &o, params).unwrap()
        })
        .collect::<Vec<_>>();

    let credential = Credential::aggregate(&partials, threshold).unwrap();
    (request, o, credential)
}

fn present_and_verify(
    rng: &mut StdRng,
    params: &SignatureParams<Bls12_381>,
    mvk: &MasterVerificationKey<Bls12_381>,
    request: &BlindSignRequest<Bls12_381>,
    credential: &Credential<Bls12_381>,
    did: &Fr,
    o: &Fr,
) -> Presentation<Bls12_381> {
    let presentation =
        Presentation::new(rng, credential, &request.com, mvk, params, did, o).unwrap();
    presentation
        .verify(&request.com, &credential.h, mvk, params)
        .unwrap();
    presentation
}

#[test]
fn single_voter_full_pipeline() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SignatureParams::<Bls12_381>::generate(&mut rng);
    let (mvk, keys) = run_dkg(&mut rng, 2, 3, &params);

    let did = Did::<Fr>::new(&mut rng, "voter-001");
    let did_scalar = did.as_scalar().unwrap();

    let committee = keys.iter().collect::<Vec<_>>();
    let (request, o, credential) = issue(&mut rng, &params, &committee, 2, &did_scalar);
    credential.verify(&mvk, &did_scalar, &params).unwrap();

    let presentation = present_and_verify(
        &mut rng,
        &params,
        &mvk,
        &request,
        &credential,
        &did_scalar,
        &o,
    );
    assert_ne!(presentation.sigma.h, credential.h);
}

#[test]
fn corrupted_fragment_is_caught_at_unblinding() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SignatureParams::<Bls12_381>::generate(&mut rng);
    let (_, keys) = run_dkg(&mut rng, 2, 3, &params);

    let did = Did::<Fr>::new(&mut rng, "voter-001");
    let did_scalar = did.as_scalar().unwrap();
    let (request, o) = BlindSignRequest::new(&mut rng, &params, &did_scalar).unwrap();

    let mut blind = BlindSignature::new(&request, &keys[1].signing, &params).unwrap();
    blind.cm = (blind.cm.into_group() + params.g1).into_affine();

    assert!(matches!(
        PartialSignature::new(
            &blind,
            &request,
            &keys[1].verification,
            &did_scalar,
            &o,
            &params
        ),
        Err(CredentialError::UnblindCheckFailed)
    ));
}

#[test]
fn many_voters_with_random_committees() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SignatureParams::<Bls12_381>::generate(&mut rng);
    let (mvk, keys) = run_dkg(&mut rng, 3, 5, &params);

    for voter in 0..10 {
        let did = Did::<Fr>::new(&mut rng, &format!("voter-{voter:03}"));
        let did_scalar = did.as_scalar().unwrap();

        let committee = keys
            .iter()
            .collect::<Vec<_>>()
            .choose_multiple(&mut rng, 4)
            .copied()
            .collect::<Vec<_>>();

        let (request, o, credential) = issue(&mut rng, &params, &committee, 3, &did_scalar);
        present_and_verify(
            &mut rng,
            &params,
            &mvk,
            &request,
            &credential,
            &did_scalar,
            &o,
        );
    }
}

macro_rules! test_serialization {
    ($obj_type:ty, $obj: ident) => {
        // Canonical ark serialization
        let mut serz = vec![];
        ark_serialize::CanonicalSerialize::serialize_compressed(&$obj, &mut serz).unwrap();
        let deserz: $obj_type =
            ark_serialize::CanonicalDeserialize::deserialize_compressed(&serz[..]).unwrap();
        assert_eq!(deserz, $obj);

        // JSON serialization with serde
        let obj_ser = serde_json::to_string(&$obj).unwrap();
        let obj_deser = serde_json::from_str::<$obj_type>(&obj_ser).unwrap();
        assert_eq!($obj, obj_deser);
    };
}

#[test]
fn wire_types_round_trip_through_serialization() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SignatureParams::<Bls12_381>::generate(&mut rng);
    let (mvk, keys) = run_dkg(&mut rng, 2, 3, &params);

    let did = Did::<Fr>::new(&mut rng, "voter-001").as_scalar().unwrap();
    let (request, o) = BlindSignRequest::new(&mut rng, &params, &did).unwrap();
    let blind = BlindSignature::new(&request, &keys[0].signing, &params).unwrap();
    let partial =
        PartialSignature::new(&blind, &request, &keys[0].verification, &did, &o, &params).unwrap();

    test_serialization!(SignatureParams<Bls12_381>, params);
    test_serialization!(MasterVerificationKey<Bls12_381>, mvk);
    test_serialization!(BlindSignRequest<Bls12_381>, request);
    test_serialization!(BlindSignature<Bls12_381>, blind);
    test_serialization!(PartialSignature<Bls12_381>, partial);

    let committee = keys.iter().collect::<Vec<_>>();
    let (request, o, credential) = issue(&mut rng, &params, &committee, 2, &did);
    let presentation =
        Presentation::new(&mut rng, &credential, &request.com, &mvk, &params, &did, &o).unwrap();

    test_serialization!(Credential<Bls12_381>, credential);
    test_serialization!(Presentation<Bls12_381>, presentation);
}

#[test]
fn presentations_from_distinct_voters_do_not_cross_verify() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = SignatureParams::<Bls12_381>::generate(&mut rng);
    let (mvk, keys) = run_dkg(&mut rng, 2, 3, &params);
    let committee = keys.iter().collect::<Vec<_>>();

    let did_a = Did::<Fr>::new(&mut rng, "voter-001").as_scalar().unwrap();
    let did_b = Did::<Fr>::new(&mut rng, "voter-002").as_scalar().unwrap();

    let (request_a, o_a, credential_a) = issue(&mut rng, &params, &committee, 2, &did_a);
    let (request_b, _, credential_b) = issue(&mut rng, &params, &committee, 2, &did_b);

    let presentation =
        Presentation::new(&mut rng, &credential_a, &request_a.com, &mvk, &params, &did_a, &o_a)
            .unwrap();

    // Same presentation against the other voter's issuance context
    assert!(presentation
        .verify(&request_b.com, &credential_b.h, &mvk, &params)
        .is_err());
}
