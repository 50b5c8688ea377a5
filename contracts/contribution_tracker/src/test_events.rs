extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Bytes, Env, IntoVal, Symbol, TryIntoVal,
};

use crate::events::{
    AuthorityBound, ContributionApproved, ContributionLogged, ContributionRejected,
    ContributionVerified, MaxApproversUpdated, MinApprovalsUpdated,
};
use crate::{ContributionTracker, ContributionTrackerClient};

fn setup() -> (Env, ContributionTrackerClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(ContributionTracker, ());
    let client = ContributionTrackerClient::new(&env, &contract_id);
    (env, client)
}

fn setup_with_authority() -> (Env, ContributionTrackerClient<'static>, Address) {
    let (env, client) = setup();
    let authority = Address::generate(&env);
    client.bind_authority(&authority);
    (env, client, authority)
}

fn evidence(env: &Env) -> Bytes {
    Bytes::from_array(env, &[0xabu8; 32])
}

#[test]
fn test_authority_bound_event() {
    let (env, client) = setup();
    let authority = Address::generate(&env);
    client.bind_authority(&authority);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("auth_set").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: AuthorityBound = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, AuthorityBound { authority });
}

#[test]
fn test_config_update_events() {
    let (env, client, authority) = setup_with_authority();

    client.set_max_approvers(&8);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("max_set").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: MaxApproversUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        MaxApproversUpdated {
            authority: authority.clone(),
            max_approvers: 8,
        }
    );

    client.set_min_approvals(&4);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("min_set").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: MinApprovalsUpdated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        MinApprovalsUpdated {
            authority,
            min_approvals: 4,
        }
    );
}

#[test]
fn test_contribution_logged_event() {
    let (env, client) = setup();
    let volunteer = Address::generate(&env);
    let id = client.log_contribution(&volunteer, &3, &12, &evidence(&env));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("logged"), contribution_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("logged").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionLogged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionLogged {
            contribution_id: id,
            volunteer,
            project_id: 3,
            hours: 12,
        }
    );
}

#[test]
fn test_pending_approval_emits_only_approved() {
    let (env, client) = setup();
    let volunteer = Address::generate(&env);
    let approver = Address::generate(&env);
    let id = client.log_contribution(&volunteer, &1, &10, &evidence(&env));

    client.verify_contribution(&approver, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("approved").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionApproved = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionApproved {
            contribution_id: id,
            approver,
            approval_count: 1,
        }
    );
}

#[test]
fn test_quorum_emits_approved_then_verified() {
    let (env, client) = setup();
    let volunteer = Address::generate(&env);
    let id = client.log_contribution(&volunteer, &1, &10, &evidence(&env));
    client.verify_contribution(&Address::generate(&env), &id);

    let second = Address::generate(&env);
    client.verify_contribution(&second, &id);

    let all_events = env.events().all();
    let n = all_events.len();
    assert!(n >= 2);

    let approved = all_events.get(n - 2).unwrap();
    let approved_data: ContributionApproved = approved.2.try_into_val(&env).unwrap();
    assert_eq!(
        approved_data,
        ContributionApproved {
            contribution_id: id,
            approver: second,
            approval_count: 2,
        }
    );

    let verified = all_events.get(n - 1).unwrap();
    let expected_topics = vec![
        &env,
        symbol_short!("verified").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(verified.1, expected_topics);
    let verified_data: ContributionVerified = verified.2.try_into_val(&env).unwrap();
    assert_eq!(
        verified_data,
        ContributionVerified {
            contribution_id: id,
            approval_count: 2,
        }
    );
}

#[test]
fn test_contribution_rejected_event() {
    let (env, client, authority) = setup_with_authority();
    let volunteer = Address::generate(&env);
    let id = client.log_contribution(&volunteer, &1, &10, &evidence(&env));

    client.reject_contribution(&authority, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("rejected").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionRejected = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionRejected {
            contribution_id: id,
            rejected_by: authority,
        }
    );
}

#[test]
fn test_failed_call_emits_nothing() {
    let (env, client) = setup();
    let volunteer = Address::generate(&env);
    let _ = client.try_log_contribution(&volunteer, &0, &10, &evidence(&env));
    for event in env.events().all().iter() {
        let topic: Symbol = event.1.get(0).unwrap().try_into_val(&env).unwrap();
        assert_ne!(topic, symbol_short!("logged"));
    }
}
