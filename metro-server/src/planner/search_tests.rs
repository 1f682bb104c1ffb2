//! Unit tests for the shortest-path search.

use super::*;
use crate::network::{NetworkBuilder, NetworkModel, red_line};

const EPS: f64 = 1e-9;

fn names(route: &Route) -> Vec<&str> {
    route.path().iter().map(|s| s.as_str()).collect()
}

fn found(result: RouteResult) -> Route {
    match result {
        RouteResult::Found(route) => route,
        RouteResult::NoRoute => panic!("expected a route"),
    }
}

/// Two separate lines: A-B-C and X-Y.
fn split_network() -> NetworkModel {
    NetworkBuilder::new()
        .add_edge("A", "B", 1.0)
        .add_edge("B", "C", 1.0)
        .add_edge("X", "Y", 2.0)
        .build()
        .unwrap()
}

#[test]
fn full_red_line() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(
        planner
            .find_shortest_path("Shaheed Sthal", "Mansarovar Park")
            .unwrap(),
    );

    assert_eq!(
        names(&route),
        vec![
            "Shaheed Sthal",
            "Hindon River",
            "Arthala",
            "Mohan Nagar",
            "Shyam Park",
            "Major Mohit Sharma",
            "Raj Bagh",
            "Shaheed Nagar",
            "Dilshad Garden",
            "Jhil mil",
            "Mansarovar Park",
        ]
    );
    assert!((route.total_distance_km() - 11.4).abs() < EPS);
    assert_eq!(route.hop_count(), 10);

    let fare = planner.calculate_fare(route.total_distance_km()).unwrap();
    assert_eq!(fare.amount(), 32.8);
}

#[test]
fn short_red_line_trip() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(planner.find_shortest_path("Shaheed Sthal", "Arthala").unwrap());

    assert_eq!(names(&route), vec!["Shaheed Sthal", "Hindon River", "Arthala"]);
    assert!((route.total_distance_km() - 2.5).abs() < EPS);
    assert_eq!(route.origin().as_str(), "Shaheed Sthal");
    assert_eq!(route.destination().as_str(), "Arthala");
}

#[test]
fn reverse_direction() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(planner.find_shortest_path("Arthala", "Shaheed Sthal").unwrap());

    assert_eq!(names(&route), vec!["Arthala", "Hindon River", "Shaheed Sthal"]);
    assert!((route.total_distance_km() - 2.5).abs() < EPS);
}

#[test]
fn same_station() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(planner.find_shortest_path("Raj Bagh", "Raj Bagh").unwrap());

    assert_eq!(names(&route), vec!["Raj Bagh"]);
    assert_eq!(route.total_distance_km(), 0.0);
    assert_eq!(route.hop_count(), 0);
}

#[test]
fn unknown_source() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    assert_eq!(
        planner.find_shortest_path("Atlantis", "Arthala"),
        Err(PlannerError::UnknownStation("Atlantis".into()))
    );
}

#[test]
fn unknown_destination() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    assert_eq!(
        planner.find_shortest_path("Arthala", "arthala"),
        Err(PlannerError::UnknownStation("arthala".into()))
    );
}

#[test]
fn unknown_station_checked_before_search() {
    // A zero budget would fail any real search, so only validation can run
    let network = red_line().unwrap();
    let config = PlannerConfig::new(FareConfig::default(), Some(0));
    let planner = RoutePlanner::new(&network, &config);

    assert!(matches!(
        planner.find_shortest_path("Shaheed Sthal", "Nowhere"),
        Err(PlannerError::UnknownStation(_))
    ));
}

#[test]
fn disconnected_is_no_route() {
    let network = split_network();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let result = planner.find_shortest_path("A", "Y").unwrap();
    assert_eq!(result, RouteResult::NoRoute);
    assert!(!result.is_found());
    assert!(result.route().is_none());

    // Within a component, routes still work
    assert!(planner.find_shortest_path("X", "Y").unwrap().is_found());
}

#[test]
fn prefers_shorter_path_with_more_hops() {
    // A -> D directly is 10, A -> B -> C -> D is 3
    let network = NetworkBuilder::new()
        .add_edge("A", "D", 10.0)
        .add_edge("A", "B", 1.0)
        .add_edge("B", "C", 1.0)
        .add_edge("C", "D", 1.0)
        .build()
        .unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(planner.find_shortest_path("A", "D").unwrap());
    assert_eq!(names(&route), vec!["A", "B", "C", "D"]);
    assert!((route.total_distance_km() - 3.0).abs() < EPS);
}

#[test]
fn relaxation_updates_worse_tentative_distance() {
    // C is first reached via A directly (5), then improved via B (1 + 1)
    let network = NetworkBuilder::new()
        .add_edge("A", "C", 5.0)
        .add_edge("A", "B", 1.0)
        .add_edge("B", "C", 1.0)
        .add_edge("C", "D", 1.0)
        .build()
        .unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let route = found(planner.find_shortest_path("A", "D").unwrap());
    assert_eq!(names(&route), vec!["A", "B", "C", "D"]);
    assert!((route.total_distance_km() - 3.0).abs() < EPS);
}

#[test]
fn equal_cost_paths_are_deterministic() {
    let network = NetworkBuilder::new()
        .add_edge("A", "B", 1.0)
        .add_edge("A", "C", 1.0)
        .add_edge("B", "D", 1.0)
        .add_edge("C", "D", 1.0)
        .build()
        .unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let first = found(planner.find_shortest_path("A", "D").unwrap());
    assert!((first.total_distance_km() - 2.0).abs() < EPS);
    let via = first.path()[1].as_str();
    assert!(via == "B" || via == "C");

    for _ in 0..10 {
        let again = found(planner.find_shortest_path("A", "D").unwrap());
        assert_eq!(again, first);
    }
}

#[test]
fn budget_exceeded() {
    let network = red_line().unwrap();
    let config = PlannerConfig::new(FareConfig::default(), Some(3));
    let planner = RoutePlanner::new(&network, &config);

    assert_eq!(
        planner.find_shortest_path("Shaheed Sthal", "Mansarovar Park"),
        Err(PlannerError::SearchBudgetExceeded { settled: 4 })
    );
}

#[test]
fn budget_large_enough() {
    let network = red_line().unwrap();
    let config = PlannerConfig::new(FareConfig::default(), Some(10));
    let planner = RoutePlanner::new(&network, &config);

    assert!(
        planner
            .find_shortest_path("Shaheed Sthal", "Mansarovar Park")
            .unwrap()
            .is_found()
    );
}

#[test]
fn zero_budget_allows_trivial_route() {
    let network = red_line().unwrap();
    let config = PlannerConfig::new(FareConfig::default(), Some(0));
    let planner = RoutePlanner::new(&network, &config);

    assert!(planner.find_shortest_path("Arthala", "Arthala").unwrap().is_found());
}

#[test]
fn plan_journey_prices_route() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    let journey = planner
        .plan_journey("Shaheed Sthal", "Arthala")
        .unwrap()
        .unwrap();
    assert_eq!(journey.route.path().len(), 3);
    assert_eq!(journey.fare.amount(), 15.0);
}

#[test]
fn plan_journey_no_route() {
    let network = split_network();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    assert_eq!(planner.plan_journey("A", "X").unwrap(), None);
}

#[test]
fn plan_journey_custom_fares() {
    let network = red_line().unwrap();
    let config = PlannerConfig::new(FareConfig::new(20.0, 5.0, 0).unwrap(), None);
    let planner = RoutePlanner::new(&network, &config);

    let journey = planner
        .plan_journey("Shaheed Sthal", "Hindon River")
        .unwrap()
        .unwrap();
    assert_eq!(journey.fare.amount(), 25.0);
}

#[test]
fn calculate_fare_rejects_negative() {
    let network = red_line().unwrap();
    let config = PlannerConfig::default();
    let planner = RoutePlanner::new(&network, &config);

    assert_eq!(planner.calculate_fare(0.0).unwrap().amount(), 10.0);
    assert_eq!(
        planner.calculate_fare(-1.0),
        Err(FareError::InvalidDistance(-1.0))
    );
}

#[test]
fn planners_share_one_network() {
    use std::sync::Arc;

    let network = Arc::new(red_line().unwrap());
    let config = Arc::new(PlannerConfig::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let network = network.clone();
            let config = config.clone();
            std::thread::spawn(move || {
                let planner = RoutePlanner::new(&network, &config);
                planner
                    .find_shortest_path("Shaheed Sthal", "Mansarovar Park")
                    .unwrap()
                    .into_route()
                    .map(|r| r.path().len())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(11));
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// A connected graph: a random spanning tree plus some extra edges.
    #[derive(Debug, Clone)]
    struct Graph {
        n: usize,
        edges: Vec<(usize, usize, f64)>,
    }

    fn station(i: usize) -> String {
        format!("S{i}")
    }

    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (2usize..9).prop_flat_map(|n| {
            let tree = prop::collection::vec((any::<prop::sample::Index>(), 0.1f64..10.0), n - 1);
            let extra = prop::collection::vec((0..n, 0..n, 0.1f64..10.0), 0..n * 2);
            (Just(n), tree, extra).prop_map(|(n, tree, extra)| {
                let mut seen = HashSet::new();
                let mut edges = Vec::new();
                // Node i + 1 hangs off some earlier node
                for (i, (parent, w)) in tree.into_iter().enumerate() {
                    let child = i + 1;
                    let parent = parent.index(child);
                    seen.insert((parent.min(child), parent.max(child)));
                    edges.push((parent, child, w));
                }
                for (a, b, w) in extra {
                    if a != b && seen.insert((a.min(b), a.max(b))) {
                        edges.push((a, b, w));
                    }
                }
                Graph { n, edges }
            })
        })
    }

    fn build(graph: &Graph) -> NetworkModel {
        graph
            .edges
            .iter()
            .fold(NetworkBuilder::new(), |b, (x, y, w)| {
                b.add_edge(&station(*x), &station(*y), *w)
            })
            .build()
            .unwrap()
    }

    /// All-pairs reference distances.
    fn floyd_warshall(graph: &Graph) -> Vec<Vec<f64>> {
        let mut d = vec![vec![f64::INFINITY; graph.n]; graph.n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for &(a, b, w) in &graph.edges {
            d[a][b] = w;
            d[b][a] = w;
        }
        for k in 0..graph.n {
            for i in 0..graph.n {
                for j in 0..graph.n {
                    if d[i][k] + d[k][j] < d[i][j] {
                        d[i][j] = d[i][k] + d[k][j];
                    }
                }
            }
        }
        d
    }

    fn distance(planner: &RoutePlanner<'_>, a: usize, b: usize) -> f64 {
        found(planner.find_shortest_path(&station(a), &station(b)).unwrap()).total_distance_km()
    }

    proptest! {
        #[test]
        fn self_route_is_zero(graph in graph_strategy()) {
            let network = build(&graph);
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);

            for i in 0..graph.n {
                let route = found(planner.find_shortest_path(&station(i), &station(i)).unwrap());
                prop_assert_eq!(route.path().len(), 1);
                prop_assert_eq!(route.total_distance_km(), 0.0);
            }
        }

        #[test]
        fn distances_are_symmetric(graph in graph_strategy()) {
            let network = build(&graph);
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);

            for a in 0..graph.n {
                for b in 0..graph.n {
                    let ab = distance(&planner, a, b);
                    let ba = distance(&planner, b, a);
                    prop_assert!((ab - ba).abs() < EPS, "{} vs {}", ab, ba);
                }
            }
        }

        #[test]
        fn triangle_inequality(graph in graph_strategy()) {
            let network = build(&graph);
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);

            for a in 0..graph.n {
                for b in 0..graph.n {
                    for c in 0..graph.n {
                        let direct = distance(&planner, a, c);
                        let via = distance(&planner, a, b) + distance(&planner, b, c);
                        prop_assert!(direct <= via + EPS);
                    }
                }
            }
        }

        #[test]
        fn matches_reference_distances(graph in graph_strategy()) {
            let network = build(&graph);
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);
            let reference = floyd_warshall(&graph);

            for a in 0..graph.n {
                for b in 0..graph.n {
                    let d = distance(&planner, a, b);
                    prop_assert!((d - reference[a][b]).abs() < EPS);
                }
            }
        }

        #[test]
        fn path_is_walkable_and_sums_to_distance(graph in graph_strategy()) {
            let network = build(&graph);
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);

            for a in 0..graph.n {
                for b in 0..graph.n {
                    let route = found(planner.find_shortest_path(&station(a), &station(b)).unwrap());
                    prop_assert_eq!(route.origin().as_str(), station(a));
                    prop_assert_eq!(route.destination().as_str(), station(b));

                    let mut sum = 0.0;
                    for pair in route.path().windows(2) {
                        let neighbors = network.neighbors(pair[0].as_str()).unwrap();
                        let w = neighbors.get(&pair[1]);
                        prop_assert!(w.is_some(), "{} and {} not adjacent", pair[0], pair[1]);
                        sum += w.copied().unwrap_or_default();
                    }
                    prop_assert!((sum - route.total_distance_km()).abs() < EPS);
                }
            }
        }

        #[test]
        fn disjoint_copies_have_no_route(graph in graph_strategy()) {
            // Two copies of the same graph with distinct names never connect
            let network = graph
                .edges
                .iter()
                .fold(NetworkBuilder::new(), |b, (x, y, w)| {
                    b.add_edge(&station(*x), &station(*y), *w)
                        .add_edge(&format!("T{x}"), &format!("T{y}"), *w)
                })
                .build()
                .unwrap();
            let config = PlannerConfig::default();
            let planner = RoutePlanner::new(&network, &config);

            let result = planner.find_shortest_path(&station(0), "T0").unwrap();
            prop_assert_eq!(result, RouteResult::NoRoute);
        }
    }
}
