use navstack_entity::EntityType::*;
use navstack_entity::UseCase;
use navstack_state::{Paging, SortOption, StackEntry, WorkflowState};
use navstack_test_utils::{
    entity, list, list_state, entity_state, page_search, paging_values, side_panel_search,
    sort_values, stack_of, ENTITY_ID_1, ENTITY_ID_2, ENTITY_ID_3,
};
use pretty_assertions::assert_eq;

#[test]
fn test_remove_side_panel_params_on_list() {
    let state = list_state(true).remove_side_panel_params();

    assert_eq!(stack_of(&state), vec![(Cluster, None)]);
    assert_eq!(state.stack[0].search, page_search());
    assert_eq!(state.sort.page, sort_values().page);
    assert_eq!(state.sort.side_panel, None);
    assert_eq!(state.paging, Paging::new(paging_values().page, 0));
}

#[test]
fn test_remove_side_panel_params_on_entity() {
    let state = entity_state(true).remove_side_panel_params();
    assert_eq!(
        stack_of(&state),
        vec![(Cluster, Some(ENTITY_ID_1)), (Deployment, None)]
    );
}

#[test]
fn test_remove_side_panel_params_without_side_panel() {
    let state = entity_state(false);
    assert_eq!(state.remove_side_panel_params().stack, state.stack);
}

#[test]
fn test_skim_to_latest_entity() {
    let state = WorkflowState::new(
        UseCase::ConfigManagement,
        vec![
            list(Image),
            entity(Image, ENTITY_ID_1),
            list(Deployment),
            entity(Deployment, ENTITY_ID_2),
        ],
    );
    assert_eq!(
        state.skimmed_stack().stack,
        vec![entity(Deployment, ENTITY_ID_2)]
    );
}

#[test]
fn test_skim_to_latest_entity_and_list() {
    let state = WorkflowState::new(
        UseCase::ConfigManagement,
        vec![
            list(Image),
            entity(Image, ENTITY_ID_1),
            list(Deployment).with_search(side_panel_search()),
        ],
    )
    .with_paging(paging_values())
    .with_sort(sort_values());

    let skimmed = state.skimmed_stack();
    assert_eq!(
        skimmed.stack,
        vec![
            entity(Image, ENTITY_ID_1),
            list(Deployment).with_search(side_panel_search())
        ]
    );
    assert_eq!(skimmed.paging, Paging::new(paging_values().side_panel, 0));
    assert_eq!(skimmed.sort.page, Some(SortOption::descending("Deployment")));
    assert_eq!(skimmed.sort.side_panel, None);
}

#[test]
fn test_skim_without_side_panel_is_unchanged() {
    let state = entity_state(false);
    assert_eq!(state.skimmed_stack(), state);
}

#[test]
fn test_single_ancestor_of_type() {
    let state = WorkflowState::new(
        UseCase::ConfigManagement,
        vec![
            list(Cluster),
            entity(Cluster, ENTITY_ID_1),
            list(Deployment),
            entity(Deployment, ENTITY_ID_2),
            list(Policy),
            entity(Policy, ENTITY_ID_3),
        ],
    );

    assert_eq!(
        state.single_ancestor_of_type(Deployment),
        Some(&entity(Deployment, ENTITY_ID_2))
    );
    assert_eq!(state.single_ancestor_of_type(Namespace), None);
}

#[test]
fn test_entity_context() {
    assert!(WorkflowState::default().entity_context().is_empty());

    let state = WorkflowState::new(
        UseCase::ConfigManagement,
        vec![
            list(Cluster),
            entity(Cluster, ENTITY_ID_1),
            list(Deployment),
            entity(Deployment, ENTITY_ID_2),
            list(Policy),
        ],
    );
    let context = state.entity_context();
    assert_eq!(context.len(), 2);
    assert_eq!(context.get(&Cluster).map(String::as_str), Some(ENTITY_ID_1));
    assert_eq!(context.get(&Deployment).map(String::as_str), Some(ENTITY_ID_2));
}

#[test]
fn test_state_json_shape() {
    let state = WorkflowState::new(
        UseCase::VulnManagement,
        vec![StackEntry::list(Deployment), StackEntry::entity(Image, "img-123")],
    );
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "useCase": "VULN_MANAGEMENT",
            "stack": [
                { "entityType": "DEPLOYMENT" },
                { "entityType": "IMAGE", "entityId": "img-123" }
            ],
            "paging": { "page": 0, "sidePanel": 0 },
            "sort": { "page": null, "sidePanel": null }
        })
    );

    let parsed: WorkflowState = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, state);
}
