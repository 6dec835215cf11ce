/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Indexed binary min-heap with decrease-key
pub mod queue;
/// Stateful driver running the MST and TSP steps over one point set
pub mod solver;
/// Validate and measure tours
pub mod tour;
/// Solve the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;
