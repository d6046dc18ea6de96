use crate::logic::graph::{TokenGraph, UnionResult};
use crate::logic::pools::{PoolNodeId, PoolNodeWrapper};
use crate::logic::query::RouteQuery;
use crate::utils::{ParamMap, TokenLabel, sorted_map};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnionReport {
    pub token_in: TokenLabel,
    pub token_out: TokenLabel,
    pub max_depth: usize,
    /// Sorted by adapter name, then by canonical arguments.
    pub adapters: Vec<AdapterGroup>,
    /// Every token touched by a reported pool, sorted.
    pub tokens: Vec<TokenLabel>,
    pub truncated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdapterGroup {
    pub adapter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ParamMap>,
    /// Sorted by canonical parameters.
    pub pools: Vec<PoolEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PoolEntry {
    pub id: PoolNodeId,
    pub parameters: ParamMap,
    pub tokens: Vec<TokenLabel>,
}

impl UnionReport {
    /// Group the unioned pools by (adapter, arguments) in canonical order. The outcome only
    /// depends on the set of pools, not on dataset order or hash map iteration order.
    pub fn new(query: &RouteQuery, result: &UnionResult, token_graph: &TokenGraph) -> Self {
        let pools: Vec<&PoolNodeWrapper> = result.pool_ids.iter().filter_map(|id| token_graph.get_pool(id)).collect();

        let mut grouped: BTreeMap<(String, String), Vec<&PoolNodeWrapper>> = BTreeMap::new();
        for &pool in &pools {
            grouped.entry((pool.adapter.clone(), pool.arguments_key())).or_default().push(pool);
        }

        let adapters = grouped
            .into_values()
            .filter_map(|mut group| {
                group.sort_by_cached_key(|pool| (pool.parameters_key(), pool.tokens.clone(), pool.get_pool_id()));
                let first = group.first()?;
                Some(AdapterGroup {
                    adapter: first.adapter.clone(),
                    arguments: first.arguments.as_ref().filter(|arguments| !arguments.is_empty()).map(sorted_map),
                    pools: group
                        .iter()
                        .map(|pool| PoolEntry { id: pool.get_pool_id(), parameters: sorted_map(&pool.parameters), tokens: pool.tokens.clone() })
                        .collect(),
                })
            })
            .collect();

        let tokens: BTreeSet<TokenLabel> = pools.iter().flat_map(|pool| pool.tokens.iter().cloned()).collect();

        Self {
            token_in: query.token_in.clone(),
            token_out: query.token_out.clone(),
            max_depth: query.max_depth,
            adapters,
            tokens: tokens.into_iter().collect(),
            truncated: result.truncated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn pool_count(&self) -> usize {
        self.adapters.iter().map(|group| group.pools.len()).sum()
    }
}

impl Display for UnionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            writeln!(f, "No route from {} to {} within {} hops", self.token_in, self.token_out, self.max_depth)?;
        } else {
            writeln!(
                f,
                "Routes from {} to {} within {} hops: {} adapters, {} pools, {} tokens",
                self.token_in,
                self.token_out,
                self.max_depth,
                self.adapters.len(),
                self.pool_count(),
                self.tokens.len()
            )?;

            for group in &self.adapters {
                match &group.arguments {
                    Some(arguments) => writeln!(f, "\n{} {}", group.adapter, serde_json::Value::Object(arguments.clone()))?,
                    None => writeln!(f, "\n{}", group.adapter)?,
                }
                for pool in &group.pools {
                    let tokens = pool.tokens.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
                    writeln!(f, "  - {} [{}]", serde_json::Value::Object(pool.parameters.clone()), tokens)?;
                }
            }

            writeln!(f, "\nTokens:")?;
            for token in &self.tokens {
                writeln!(f, "  {token}")?;
            }
        }

        if self.truncated {
            writeln!(f, "\n(search stopped at the expansion limit, result may be incomplete)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{AdapterEntry, PoolRecord};
    use crate::logic::graph::test_utils::{graph_of, node};
    use crate::logic::graph::{SearchLimits, find_reachable_union};
    use crate::utils::normalize;
    use serde_json::json;

    fn union_report(token_graph: &TokenGraph, token_in: &str, token_out: &str, max_depth: usize) -> UnionReport {
        let query = RouteQuery::new(token_in, token_out, 0, max_depth, None);
        let result = find_reachable_union(token_graph, node(token_graph, token_in), node(token_graph, token_out), max_depth, SearchLimits::unlimited());
        UnionReport::new(&query, &result, token_graph)
    }

    #[test]
    fn test_groups_are_sorted() {
        let token_graph = graph_of(&[
            ("Yswap", "b", &["T2", "T3"]),
            ("Xswap", "z", &["T1", "T2"]),
            ("Xswap", "a", &["T1", "T2"]),
        ]);

        let report = union_report(&token_graph, "T1", "T3", 2);

        assert_eq!(report.adapters.len(), 2);
        assert_eq!(report.adapters[0].adapter, "Xswap");
        assert_eq!(report.adapters[1].adapter, "Yswap");
        let pools: Vec<&serde_json::Value> = report.adapters[0].pools.iter().filter_map(|p| p.parameters.get("pool")).collect();
        assert_eq!(pools, vec![&json!("a"), &json!("z")]);
        assert_eq!(report.tokens, vec![normalize("T1"), normalize("T2"), normalize("T3")]);
        assert_eq!(report.pool_count(), 3);
    }

    #[test]
    fn test_same_adapter_split_by_arguments() -> eyre::Result<()> {
        let args_b: ParamMap = serde_json::from_str(r#"{"router": "B", "chain": 1}"#)?;
        let args_a: ParamMap = serde_json::from_str(r#"{"chain": 1, "router": "A"}"#)?;
        let args_a_reordered: ParamMap = serde_json::from_str(r#"{"router": "A", "chain": 1}"#)?;

        let entries = vec![
            AdapterEntry::new("Router").with_arguments(args_b).with_pool(PoolRecord::new(ParamMap::new(), vec!["T1", "T2"])),
            AdapterEntry::new("Router").with_arguments(args_a).with_pool(PoolRecord::new(serde_json::from_str(r#"{"pool": "p2"}"#)?, vec!["T2", "T3"])),
            AdapterEntry::new("Router")
                .with_arguments(args_a_reordered)
                .with_pool(PoolRecord::new(serde_json::from_str(r#"{"pool": "p1"}"#)?, vec!["T1", "T3"])),
        ];
        let token_graph = TokenGraph::build(&entries);

        let report = union_report(&token_graph, "T1", "T3", 2);

        // arguments A and B, key order does not split a group
        assert_eq!(report.adapters.len(), 2);
        assert_eq!(report.adapters[0].arguments.as_ref().and_then(|a| a.get("router")), Some(&json!("A")));
        assert_eq!(report.adapters[0].pools.len(), 2);
        assert_eq!(report.adapters[0].pools[0].parameters.get("pool"), Some(&json!("p1")));
        assert_eq!(report.adapters[1].arguments.as_ref().and_then(|a| a.get("router")), Some(&json!("B")));
        Ok(())
    }

    #[test]
    fn test_empty_union_report() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T2", "T3"])]);

        let report = union_report(&token_graph, "T1", "T3", 1);

        assert!(report.is_empty());
        assert!(report.tokens.is_empty());
        assert!(report.to_string().starts_with("No route from T1 to T3 within 1 hops"));
    }

    #[test]
    fn test_display_lists_groups_and_tokens() {
        let token_graph = graph_of(&[("X", "PoolA", &["T1", "T2"]), ("Y", "PoolB", &["T2", "T3"])]);

        let text = union_report(&token_graph, "T1", "T3", 2).to_string();

        assert!(text.starts_with("Routes from T1 to T3 within 2 hops: 2 adapters, 2 pools, 3 tokens"));
        assert!(text.contains("\nX\n  - {\"pool\":\"PoolA\"} [T1, T2]"));
        assert!(text.contains("\nTokens:\n  T1\n  T2\n  T3\n"));
    }
}
