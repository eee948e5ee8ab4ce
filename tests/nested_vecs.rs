//! Behavioural tests for `NestedVecs`.

use trajectory_map::IdError;
use trajectory_map::NestedVecs;
use trajectory_map::NodeId;
use trajectory_map::SubmapId;

#[test]
fn padding_slots_are_created() {
    let mut vecs: NestedVecs<NodeId, &str> = NestedVecs::new();
    let x = vecs.append(0, "x");
    let y = vecs.append(0, "y");
    let z = vecs.append(2, "z");

    assert_eq!(x, NodeId::new(0, 0));
    assert_eq!(y, NodeId::new(0, 1));
    assert_eq!(z, NodeId::new(2, 0));
    assert_eq!(vecs.num_trajectories(), 3);
    assert_eq!(vecs.num_indices(1), 0);
    assert_eq!(vecs[z], "z");
}

#[test]
fn appending_to_lower_trajectory_does_not_shrink_table() {
    let mut vecs: NestedVecs<SubmapId, u8> = NestedVecs::new();
    vecs.append(5, 1);
    vecs.append(1, 2);
    assert_eq!(vecs.num_trajectories(), 6);
    assert_eq!(vecs.num_indices(1), 1);
    assert_eq!(vecs.num_indices(5), 1);
}

#[test]
fn values_are_mutable_in_place() {
    let mut vecs: NestedVecs<NodeId, Vec<u8>> = NestedVecs::new();
    let id = vecs.append(0, Vec::new());
    vecs.at_mut(id).push(1);
    vecs[id].push(2);
    vecs.get_mut(id).unwrap().push(3);
    assert_eq!(vecs.at(id), &vec![1, 2, 3]);
}

#[test]
fn out_of_range_lookups() {
    let mut vecs: NestedVecs<NodeId, u8> = NestedVecs::new();
    vecs.append(1, 1);

    assert_eq!(vecs.get(NodeId::new(1, 1)), None);
    assert_eq!(vecs.get(NodeId::new(0, 0)), None);
    assert_eq!(vecs.get(NodeId::new(2, 0)), None);
    assert_eq!(
        vecs.try_num_indices(2),
        Err(IdError::TrajectoryOutOfRange { trajectory_id: 2, num_trajectories: 2 }),
    );
}

#[test]
fn iteration_matches_append_order_per_trajectory() {
    let mut vecs: NestedVecs<NodeId, u32> = NestedVecs::new();
    for i in 0..10 {
        vecs.append(i % 3, i);
    }

    let got: Vec<_> = vecs.iter().map(|(id, v)| (id, *v)).collect();
    let mut sorted = got.clone();
    sorted.sort();
    assert_eq!(got, sorted);
    assert_eq!(got.len(), vecs.len());
    assert_eq!(vecs.trajectory(0), &[0, 3, 6, 9]);
}

#[test]
#[should_panic(expected = "trajectory 9 out of range for 1 trajectories")]
fn lookup_past_last_trajectory_panics() {
    let mut vecs: NestedVecs<NodeId, u8> = NestedVecs::new();
    let _ = vecs.append(0, 1);
    let _value = &vecs[NodeId::new(9, 0)];
}

#[test]
#[should_panic(expected = "index 0 out of range for trajectory 0 of length 0")]
fn lookup_in_padding_slot_panics() {
    let mut vecs: NestedVecs<NodeId, u8> = NestedVecs::new();
    vecs.append(1, 1);
    vecs.at_mut(NodeId::new(0, 0));
}
