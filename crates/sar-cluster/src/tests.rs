//! Unit tests for sar-cluster.

use std::collections::BTreeSet;

use sar_core::{AgentId, ClusterId, Position, TriageClass, VictimId};
use sar_map::VictimInfo;

use crate::{assign_round_robin, ClusterAssigner, ClusterError, KMeans, RescuerRole};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn victim(id: u32, x: i32, y: i32, triage: TriageClass, survival: f64) -> VictimInfo {
    let mut v = VictimInfo::new(VictimId(id), Position::new(x, y));
    v.triage = Some(triage);
    v.survival = Some(survival);
    v
}

/// Two spatial blobs far apart.
fn blobs() -> Vec<VictimInfo> {
    vec![
        victim(1, 0, 0, TriageClass::Red, 0.3),
        victim(2, 1, 0, TriageClass::Red, 0.3),
        victim(3, 0, 1, TriageClass::Red, 0.3),
        victim(4, 40, 40, TriageClass::Red, 0.3),
        victim(5, 41, 40, TriageClass::Red, 0.3),
        victim(6, 40, 41, TriageClass::Red, 0.3),
    ]
}

// ── KMeans ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kmeans_tests {
    use super::*;

    #[test]
    fn separates_obvious_groups() {
        let points = vec![vec![0.0], vec![0.1], vec![10.0], vec![10.1]];
        let fit = KMeans::new(2, 1).fit(&points).unwrap();
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[2], fit.labels[3]);
        assert_ne!(fit.labels[0], fit.labels[2]);
    }

    #[test]
    fn fewer_points_than_clusters_duplicates_centroids() {
        let points = vec![vec![1.0, 1.0]];
        let fit = KMeans::new(3, 0).fit(&points).unwrap();
        assert_eq!(fit.centroids.len(), 3);
        assert_eq!(fit.labels, vec![0]);
        assert!(fit.centroids.iter().all(|c| c == &vec![1.0, 1.0]));
    }

    #[test]
    fn same_seed_same_result() {
        let points: Vec<Vec<f64>> = (0..30).map(|i| vec![(i * 7 % 13) as f64, (i % 5) as f64]).collect();
        let a = KMeans::new(4, 99).fit(&points).unwrap();
        let b = KMeans::new(4, 99).fit(&points).unwrap();
        assert_eq!(a, b);
        assert!(a.iterations <= 100);
    }

    #[test]
    fn empty_input_and_zero_k() {
        assert!(KMeans::new(2, 0).fit(&[]).unwrap().labels.is_empty());
        assert!(matches!(KMeans::new(0, 0).fit(&[vec![1.0]]), Err(ClusterError::ZeroClusters)));
        assert!(matches!(
            KMeans::new(1, 0).fit(&[vec![1.0], vec![1.0, 2.0]]),
            Err(ClusterError::RaggedPoints)
        ));
    }
}

// ── ClusterAssigner ───────────────────────────────────────────────────────────

#[cfg(test)]
mod assigner_tests {
    use super::*;

    #[test]
    fn exactly_k_groups_covering_every_victim_once() {
        let victims = blobs();
        let groups = ClusterAssigner::new(4, 42).unwrap().partition(&victims).unwrap();
        assert_eq!(groups.len(), 4);
        let ids: Vec<u32> = groups.iter().flat_map(|g| g.victims.iter().map(|v| v.id.0)).collect();
        let unique: BTreeSet<u32> = ids.iter().copied().collect();
        assert_eq!(ids.len(), victims.len());
        assert_eq!(unique, (1..=6).collect());
        let cluster_ids: Vec<_> = groups.iter().map(|g| g.cluster_id).collect();
        assert_eq!(cluster_ids, vec![ClusterId(1), ClusterId(2), ClusterId(3), ClusterId(4)]);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let a = ClusterAssigner::new(2, 7).unwrap().partition(&blobs()).unwrap();
        let b = ClusterAssigner::new(2, 7).unwrap().partition(&blobs()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blobs_stay_together() {
        let groups = ClusterAssigner::new(2, 3).unwrap().partition(&blobs()).unwrap();
        for g in &groups {
            let near: BTreeSet<bool> = g.victims.iter().map(|v| v.position.x < 20).collect();
            assert!(near.len() <= 1, "mixed cluster {:?}", g.cluster_id);
        }
    }

    #[test]
    fn no_victims_gives_empty_groups() {
        let groups = ClusterAssigner::new(3, 0).unwrap().partition(&[]).unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.victims.is_empty()));
    }

    #[test]
    fn victims_within_a_group_are_in_id_order() {
        let mut victims = blobs();
        victims.reverse();
        let groups = ClusterAssigner::new(1, 0).unwrap().partition(&victims).unwrap();
        let ids: Vec<u32> = groups[0].victims.iter().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn unpredicted_victims_are_accepted() {
        let victims = vec![
            VictimInfo::new(VictimId(1), Position::new(0, 0)),
            VictimInfo::new(VictimId(2), Position::new(5, 5)),
        ];
        let groups = ClusterAssigner::new(2, 0).unwrap().partition(&victims).unwrap();
        assert_eq!(groups.iter().map(|g| g.victims.len()).sum::<usize>(), 2);
    }

    #[test]
    fn zero_clusters_rejected() {
        assert!(ClusterAssigner::new(0, 0).is_err());
    }
}

// ── Round robin ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod round_robin_tests {
    use super::*;

    #[test]
    fn master_first_then_workers_wrapping() {
        let groups = ClusterAssigner::new(5, 0).unwrap().partition(&blobs()).unwrap();
        let rescuers = [AgentId(10), AgentId(11)];
        let out = assign_round_robin(groups, &rescuers).unwrap();
        let who: Vec<_> = out.iter().map(|a| (a.rescuer, a.role)).collect();
        assert_eq!(
            who,
            vec![
                (AgentId(10), RescuerRole::Master),
                (AgentId(11), RescuerRole::Worker),
                (AgentId(10), RescuerRole::Master),
                (AgentId(11), RescuerRole::Worker),
                (AgentId(10), RescuerRole::Master),
            ]
        );
        assert_eq!(out[2].assignment.cluster_id, ClusterId(3));
    }

    #[test]
    fn no_rescuers_is_an_error() {
        assert!(matches!(assign_round_robin(Vec::new(), &[]), Err(ClusterError::NoRescuers)));
    }
}
