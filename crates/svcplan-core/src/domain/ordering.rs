//! Ordering engine: dependency-aware execution order for a selection.
//!
//! # Algorithm
//!
//! The selected services (resolved in catalog order) go through one stable
//! sort with this comparator:
//!
//! 1. ascending phase
//! 2. same phase: a declared prerequisite goes first
//! 3. same phase, unrelated: ascending price
//! 4. otherwise: catalog order (stability)
//!
//! This is a heuristic and not a topological sort. Dependency edges between
//! different phases have no effect, and transitive or cyclic conflicts are
//! not resolved.
//!
//! Rules 2 and 3 together are not transitive, so the comparator is not a
//! total order. `slice::sort_by` may panic on such comparators; the merge
//! sort below never does, and stays stable and deterministic.
//!
//! The sorted sequence is then partitioned twice for display: by phase, and
//! by process category (Ideate, Innovate, Operate, Uncategorized).

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use tracing::{instrument, trace};

use crate::domain::{
    entities::{Catalog, Selection, Service},
    value_objects::{Phase, Price, ProcessCategory},
};

// ── Output types ─────────────────────────────────────────────────────────────

/// Services sharing a phase, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseGroup {
    pub phase: Phase,
    pub label: String,
    pub services: Vec<Service>,
}

impl PhaseGroup {
    pub fn subtotal(&self) -> Price {
        self.services.iter().map(|s| s.price).sum()
    }
}

/// Key of a process-category group. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Ideate,
    Innovate,
    Operate,
    Uncategorized,
}

impl CategoryKey {
    pub const DISPLAY_ORDER: [CategoryKey; 4] = [
        Self::Ideate,
        Self::Innovate,
        Self::Operate,
        Self::Uncategorized,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ideate => "Ideate",
            Self::Innovate => "Innovate",
            Self::Operate => "Operate",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl From<Option<ProcessCategory>> for CategoryKey {
    fn from(category: Option<ProcessCategory>) -> Self {
        match category {
            Some(ProcessCategory::Ideate) => Self::Ideate,
            Some(ProcessCategory::Innovate) => Self::Innovate,
            Some(ProcessCategory::Operate) => Self::Operate,
            None => Self::Uncategorized,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Services sharing a process category, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: CategoryKey,
    pub services: Vec<Service>,
}

/// Ordered and grouped rendering of a selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecutionPlan {
    pub ordered: Vec<Service>,
    pub by_phase: Vec<PhaseGroup>,
    pub by_category: Vec<CategoryGroup>,
}

impl ExecutionPlan {
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Ids in execution order.
    pub fn ids(&self) -> Vec<&str> {
        self.ordered.iter().map(|s| s.id.as_str()).collect()
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Produce the execution plan for `selection`.
///
/// Unknown ids are dropped; services without a process category land in the
/// `Uncategorized` group. Never fails.
#[instrument(skip_all, fields(selected = selection.len(), catalog = catalog.len()))]
pub fn plan(catalog: &Catalog, selection: &Selection) -> ExecutionPlan {
    let resolved = selection.resolve(catalog);
    let ordered: Vec<Service> = stable_sort_by(resolved, compare)
        .into_iter()
        .cloned()
        .collect();

    trace!(order = ?ordered.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), "ordered selection");

    ExecutionPlan {
        by_phase: group_by_phase(&ordered),
        by_category: group_by_category(&ordered),
        ordered,
    }
}

/// Order only, without the display groupings.
pub fn order<'a>(catalog: &'a Catalog, selection: &Selection) -> Vec<&'a Service> {
    stable_sort_by(selection.resolve(catalog), compare)
}

/// The pairwise rule behind [`plan`].
pub fn compare(a: &Service, b: &Service) -> Ordering {
    if a.phase != b.phase {
        return a.phase.cmp(&b.phase);
    }
    if b.depends_on(a.id.as_str()) {
        return Ordering::Less;
    }
    if a.depends_on(b.id.as_str()) {
        return Ordering::Greater;
    }
    a.price.cmp_amount(&b.price)
}

/// Partition an ordered sequence by phase, ascending.
pub fn group_by_phase(ordered: &[Service]) -> Vec<PhaseGroup> {
    let mut phases: Vec<Phase> = ordered.iter().map(|s| s.phase).collect();
    phases.sort_unstable();
    phases.dedup();

    phases
        .into_iter()
        .map(|phase| PhaseGroup {
            phase,
            label: phase.label(),
            services: ordered
                .iter()
                .filter(|s| s.phase == phase)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Partition an ordered sequence by process category in display order.
/// Empty categories are omitted.
pub fn group_by_category(ordered: &[Service]) -> Vec<CategoryGroup> {
    CategoryKey::DISPLAY_ORDER
        .into_iter()
        .filter_map(|category| {
            let services: Vec<Service> = ordered
                .iter()
                .filter(|s| CategoryKey::from(s.process_category) == category)
                .cloned()
                .collect();
            (!services.is_empty()).then_some(CategoryGroup { category, services })
        })
        .collect()
}

/// Top-down stable merge sort.
///
/// Takes from the left run unless the right head compares strictly less, so
/// equal elements keep their input order whatever the comparator does.
fn stable_sort_by<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    T: Copy,
    F: FnMut(T, T) -> Ordering,
{
    fn sort<T: Copy, F: FnMut(T, T) -> Ordering>(items: &[T], cmp: &mut F) -> Vec<T> {
        if items.len() <= 1 {
            return items.to_vec();
        }

        let (left, right) = items.split_at(items.len() / 2);
        let left = sort(left, cmp);
        let right = sort(right, cmp);

        let mut merged = Vec::with_capacity(items.len());
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            if cmp(right[j], left[i]) == Ordering::Less {
                merged.push(right[j]);
                j += 1;
            } else {
                merged.push(left[i]);
                i += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
        merged
    }

    sort(&items, &mut cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, phase: i64, price: f64, deps: &[&str]) -> Service {
        Service::builder()
            .id(id)
            .title(id)
            .price(price)
            .phase(phase)
            .dependencies(deps.iter().copied())
            .build()
            .unwrap()
    }

    fn tagged(id: &str, phase: i64, price: f64, category: ProcessCategory) -> Service {
        Service::builder()
            .id(id)
            .title(id)
            .price(price)
            .phase(phase)
            .process_category(category)
            .build()
            .unwrap()
    }

    fn plan_ids(catalog: &Catalog, ids: &[&str]) -> Vec<String> {
        let selection = Selection::from_ids(catalog, ids.iter().copied());
        plan(catalog, &selection)
            .ordered
            .iter()
            .map(|s| s.id.to_string())
            .collect()
    }

    #[test]
    fn end_to_end_scenario() {
        let catalog = Catalog::new(vec![
            service("A", 1, 100.0, &[]),
            service("B", 1, 200.0, &["A"]),
            service("C", 2, 50.0, &[]),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["B", "C", "A"]);

        let plan = plan(&catalog, &selection);
        assert_eq!(plan.ids(), ["A", "B", "C"]);
        assert_eq!(selection.total_price(&catalog).amount(), 350.0);
    }

    #[test]
    fn lower_phase_comes_first_regardless_of_price() {
        let catalog = Catalog::new(vec![
            service("late", 3, 1.0, &[]),
            service("early", 1, 9_999.0, &[]),
        ])
        .unwrap();
        assert_eq!(plan_ids(&catalog, &["late", "early"]), ["early", "late"]);
    }

    #[test]
    fn same_phase_prerequisite_precedes_cheaper_dependent() {
        // Without the dependency rule, the cheaper "b" would go first.
        let catalog = Catalog::new(vec![
            service("b", 2, 10.0, &["a"]),
            service("a", 2, 500.0, &[]),
        ])
        .unwrap();
        assert_eq!(plan_ids(&catalog, &["a", "b"]), ["a", "b"]);
    }

    #[test]
    fn single_pass_can_leave_dependent_ahead_of_distant_prerequisite() {
        // "b" beats "x" on price and "x" beats "a" on price, so "a" never
        // meets "b" in a merge step. Pinned: the ordering is a heuristic,
        // not a topological sort.
        let catalog = Catalog::new(vec![
            service("b", 1, 10.0, &["a"]),
            service("x", 1, 100.0, &[]),
            service("a", 1, 500.0, &[]),
        ])
        .unwrap();
        assert_eq!(plan_ids(&catalog, &["a", "b", "x"]), ["b", "x", "a"]);
    }

    #[test]
    fn cross_phase_dependency_has_no_effect() {
        // "x" depends on "y" but sits in an earlier phase: phase wins.
        let catalog = Catalog::new(vec![
            service("y", 2, 10.0, &[]),
            service("x", 1, 10.0, &["y"]),
        ])
        .unwrap();
        assert_eq!(plan_ids(&catalog, &["x", "y"]), ["x", "y"]);
    }

    #[test]
    fn unrelated_same_phase_services_sort_by_price() {
        let catalog = Catalog::new(vec![
            service("p300", 1, 300.0, &[]),
            service("p100", 1, 100.0, &[]),
            service("p200", 1, 200.0, &[]),
        ])
        .unwrap();
        assert_eq!(
            plan_ids(&catalog, &["p300", "p100", "p200"]),
            ["p100", "p200", "p300"]
        );
    }

    #[test]
    fn full_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            service("z", 1, 100.0, &[]),
            service("m", 1, 100.0, &[]),
            service("a", 1, 100.0, &[]),
        ])
        .unwrap();
        assert_eq!(plan_ids(&catalog, &["a", "m", "z"]), ["z", "m", "a"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let catalog = Catalog::new(vec![
            service("a", 1, 300.0, &[]),
            service("b", 1, 100.0, &["a"]),
            service("c", 1, 200.0, &["b"]),
            service("d", 2, 50.0, &["a"]),
            service("e", 1, 200.0, &[]),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["a", "b", "c", "d", "e"]);

        let first = plan(&catalog, &selection);
        for _ in 0..10 {
            assert_eq!(plan(&catalog, &selection), first);
        }
    }

    #[test]
    fn output_is_phase_monotonic_even_with_cyclic_rules() {
        // a < b (dependency), b < x (price), x < a (price): not a total order.
        let catalog = Catalog::new(vec![
            service("a", 1, 300.0, &[]),
            service("b", 1, 100.0, &["a"]),
            service("x", 1, 200.0, &[]),
            service("late", 2, 1.0, &[]),
            service("early", 1, 999.0, &[]),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["a", "b", "x", "late", "early"]);

        let plan = plan(&catalog, &selection);
        assert_eq!(plan.len(), 5);
        assert!(plan.ordered.windows(2).all(|w| w[0].phase <= w[1].phase));
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let catalog = Catalog::new(vec![service("a", 1, 1.0, &[])]).unwrap();
        let mut selection = Selection::new();
        selection.toggle(&catalog, "a");
        selection.toggle(&catalog, "does-not-exist");

        let plan = plan(&catalog, &selection);
        assert_eq!(plan.ids(), ["a"]);
    }

    #[test]
    fn empty_selection_yields_empty_plan() {
        let catalog = Catalog::new(vec![service("a", 1, 1.0, &[])]).unwrap();
        let plan = plan(&catalog, &Selection::new());

        assert!(plan.is_empty());
        assert!(plan.by_phase.is_empty());
        assert!(plan.by_category.is_empty());
    }

    #[test]
    fn phase_groups_are_ascending_and_keep_order() {
        let catalog = Catalog::new(vec![
            service("c", 3, 10.0, &[]),
            service("a2", 1, 20.0, &[]),
            service("a1", 1, 10.0, &[]),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["c", "a2", "a1"]);
        let plan = plan(&catalog, &selection);

        let phases: Vec<_> = plan.by_phase.iter().map(|g| g.phase.get()).collect();
        assert_eq!(phases, [1, 3]);

        let first: Vec<_> = plan.by_phase[0].services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(first, ["a1", "a2"]);
        assert_eq!(plan.by_phase[0].label, "Analysis");
        assert_eq!(plan.by_phase[0].subtotal().amount(), 30.0);
    }

    #[test]
    fn category_groups_use_display_order_with_uncategorized_last() {
        let catalog = Catalog::new(vec![
            service("plain", 1, 10.0, &[]),
            tagged("run", 1, 20.0, ProcessCategory::Operate),
            tagged("idea", 2, 5.0, ProcessCategory::Ideate),
            tagged("new", 1, 30.0, ProcessCategory::Innovate),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["plain", "run", "idea", "new"]);
        let plan = plan(&catalog, &selection);

        let keys: Vec<_> = plan.by_category.iter().map(|g| g.category).collect();
        assert_eq!(
            keys,
            [
                CategoryKey::Ideate,
                CategoryKey::Innovate,
                CategoryKey::Operate,
                CategoryKey::Uncategorized
            ]
        );
    }

    #[test]
    fn category_groups_skip_empty_categories() {
        let catalog = Catalog::new(vec![
            tagged("b", 1, 20.0, ProcessCategory::Operate),
            tagged("a", 1, 10.0, ProcessCategory::Operate),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["a", "b"]);
        let plan = plan(&catalog, &selection);

        assert_eq!(plan.by_category.len(), 1);
        let ids: Vec<_> = plan.by_category[0]
            .services
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn order_matches_plan() {
        let catalog = Catalog::new(vec![
            service("b", 1, 200.0, &["a"]),
            service("a", 1, 100.0, &[]),
        ])
        .unwrap();
        let selection = Selection::from_ids(&catalog, ["a", "b"]);

        let ids: Vec<_> = order(&catalog, &selection)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, plan(&catalog, &selection).ids());
    }

    #[test]
    fn merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let refs: Vec<&(i32, char)> = items.iter().collect();
        let sorted = stable_sort_by(refs, |x, y| x.0.cmp(&y.0));
        let tags: String = sorted.iter().map(|x| x.1).collect();
        assert_eq!(tags, "bdac");
    }
}
