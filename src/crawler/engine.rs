//! Bounded traversal engine
//!
//! The engine owns all traversal state (link graph, depth table, frontier,
//! budgets, and the discovered-item counter) and advances it one candidate
//! node at a time:
//!
//! 1. Pick the next candidate of the current round. A round is a snapshot of
//!    the eligible nodes: every unexpanded node for breadth-first search, or
//!    every pending node for depth-first search (falling back to the
//!    depth-exhausted ones once no pending node is left).
//! 2. Skip the candidate if it sits at the depth limit.
//! 3. Otherwise fetch its links and record every link not yet in the graph,
//!    each with its own retained links and a depth one below the candidate.
//! 4. Depth-first search stops after the first new node and starts a new
//!    round from the fresh frontier, so a single branch keeps growing.
//!
//! The run ends when `max_items` nodes have been discovered or when no
//! candidate is left.

use crate::crawler::options::{FetchFailurePolicy, SearchOrder, TraversalOptions};
use crate::fetcher::LinkFetcher;
use crate::graph::{DepthTable, LinkGraph, NodeId};
use crate::state::{Frontier, NodeState};
use crate::{FetchError, MapperError};
use std::collections::VecDeque;
use std::fmt;

/// Discoveries between two progress notifications
const PROGRESS_INTERVAL: usize = 25;

/// Logs at info level, or at debug level when the run is silent
macro_rules! notify {
    ($silent:expr, $($arg:tt)+) => {
        if $silent {
            tracing::debug!($($arg)+)
        } else {
            tracing::info!($($arg)+)
        }
    };
}

/// Result of offering one candidate node for expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOutcome {
    /// Every link of the node was processed
    FullyExpanded { added: usize },
    /// Depth-first search added one new child; the node's other links wait
    DepthExhausted { added: usize },
    /// The node is at the depth limit and its links were not fetched
    SkippedDueToDepthLimit,
    /// The item budget ran out while the node was being expanded
    BudgetReached { added: usize },
}

impl ExpansionOutcome {
    /// Number of nodes discovered during the expansion
    pub fn added(&self) -> usize {
        match self {
            Self::FullyExpanded { added }
            | Self::DepthExhausted { added }
            | Self::BudgetReached { added } => *added,
            Self::SkippedDueToDepthLimit => 0,
        }
    }
}

/// Why a traversal stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `max_items` nodes were discovered
    ItemBudget,
    /// Every reachable node allowed by the budgets was expanded
    FrontierExhausted,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemBudget => "item_budget",
            Self::FrontierExhausted => "frontier_exhausted",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One step of the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A candidate was offered for expansion
    Expanded {
        node: NodeId,
        outcome: ExpansionOutcome,
    },
    /// The traversal is over; further steps return the same value
    Finished(Termination),
}

/// Final state of a completed traversal
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub graph: LinkGraph,
    pub depths: DepthTable,
    /// Nodes discovered after the seed
    pub items_discovered: usize,
    pub termination: Termination,
    /// Branching limit in force at the end (None if it was never detected)
    pub effective_breadth: Option<usize>,
}

/// Bounded breadth-first / depth-first traversal over a link fetcher
pub struct Engine<F> {
    fetcher: F,
    options: TraversalOptions,
    graph: LinkGraph,
    depths: DepthTable,
    frontier: Frontier,
    round: VecDeque<NodeId>,
    breadth_limit: Option<usize>,
    discovered: usize,
    finished: Option<Termination>,
}

impl<F: LinkFetcher> Engine<F> {
    /// Fetches the seed's links and prepares the traversal
    ///
    /// The seed keeps its first `max_breadth` links, or all of them when the
    /// branching limit is to be detected.
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Ready to advance
    /// * `Err(MapperError::Fetch)` - The seed fetch failed under `Abort`
    pub async fn start(
        fetcher: F,
        seed: NodeId,
        options: TraversalOptions,
    ) -> Result<Self, MapperError> {
        notify!(
            options.silent,
            "Running crawler from '{}': {}-first search, max items {}, max breadth {}, max depth {}",
            seed,
            options.order,
            options.budgets.max_items,
            options.budgets.max_breadth,
            options.budgets.max_depth
        );

        let breadth_limit = if options.budgets.detects_breadth() {
            None
        } else {
            Some(options.budgets.max_breadth)
        };

        let mut engine = Self {
            fetcher,
            options,
            graph: LinkGraph::new(),
            depths: DepthTable::with_seed(seed.clone()),
            frontier: Frontier::with_seed(seed.clone()),
            round: VecDeque::new(),
            breadth_limit,
            discovered: 0,
            finished: None,
        };

        let mut links = engine.fetch(&seed).await?;
        if let Some(limit) = engine.breadth_limit {
            links.truncate(limit);
        }
        engine.graph = LinkGraph::with_seed(seed, links);

        Ok(engine)
    }

    /// Offers the next candidate node for expansion
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Expanded)` - One candidate was processed
    /// * `Ok(Step::Finished)` - The traversal is over
    /// * `Err(MapperError)` - A fetch failed under `Abort`, or the state
    ///   became inconsistent
    pub async fn advance(&mut self) -> Result<Step, MapperError> {
        if let Some(termination) = self.finished {
            return Ok(Step::Finished(termination));
        }

        if self.discovered >= self.options.budgets.max_items {
            return Ok(self.finish(Termination::ItemBudget));
        }

        let Some(node) = self.next_candidate() else {
            return Ok(self.finish(Termination::FrontierExhausted));
        };

        let outcome = self.expand(&node).await?;
        tracing::trace!("{} -> {:?}", node, outcome);

        match outcome {
            ExpansionOutcome::FullyExpanded { .. } | ExpansionOutcome::SkippedDueToDepthLimit => {
                self.frontier.transition(&node, NodeState::Expanded)?;
            }
            ExpansionOutcome::DepthExhausted { .. } => {
                self.frontier.transition(&node, NodeState::DepthExhausted)?;
                // The new child must be considered before any older sibling
                self.round.clear();
            }
            ExpansionOutcome::BudgetReached { .. } => {
                self.finish(Termination::ItemBudget);
            }
        }

        Ok(Step::Expanded { node, outcome })
    }

    /// Advances until the traversal finishes
    pub async fn run(mut self) -> Result<CrawlOutcome, MapperError> {
        loop {
            if let Step::Finished(termination) = self.advance().await? {
                return Ok(self.into_outcome(termination));
            }
        }
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn depths(&self) -> &DepthTable {
        &self.depths
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Nodes discovered after the seed so far
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// Branching limit in force, once known
    pub fn breadth_limit(&self) -> Option<usize> {
        self.breadth_limit
    }

    /// Pops the next candidate, starting a new round when the current one is used up
    fn next_candidate(&mut self) -> Option<NodeId> {
        if self.round.is_empty() {
            let candidates = match self.options.order {
                SearchOrder::Breadth => self.frontier.breadth_candidates(),
                SearchOrder::Depth => self.frontier.depth_candidates(),
            };
            tracing::trace!("New round with {} candidates", candidates.len());
            self.round = candidates.into();
        }

        while let Some(node) = self.round.pop_front() {
            let done = self
                .frontier
                .state(node.as_str())
                .map_or(true, |state| state.is_terminal());
            if !done {
                return Some(node);
            }
        }

        None
    }

    /// Processes the links of one candidate node
    async fn expand(&mut self, node: &NodeId) -> Result<ExpansionOutcome, MapperError> {
        let depth = self.depths.get(node.as_str()).unwrap_or(1);

        if self.options.budgets.is_depth_bounded(depth) {
            tracing::debug!("{} is at depth {}, not expanding", node, depth);
            return Ok(ExpansionOutcome::SkippedDueToDepthLimit);
        }

        tracing::debug!("Expanding {} (depth {})", node, depth);
        let links = self.fetch(node).await?;

        let mut added = 0;
        for target in links {
            if self.graph.contains(target.as_str()) {
                continue;
            }

            self.discover(target, depth + 1).await?;
            added += 1;

            if self.discovered >= self.options.budgets.max_items {
                return Ok(ExpansionOutcome::BudgetReached { added });
            }

            if self.options.order == SearchOrder::Depth {
                return Ok(ExpansionOutcome::DepthExhausted { added });
            }
        }

        Ok(ExpansionOutcome::FullyExpanded { added })
    }

    /// Records a newly found node with its retained links
    async fn discover(&mut self, node: NodeId, depth: u32) -> Result<(), MapperError> {
        let mut links = self.fetch(&node).await?;
        let retained = self.retained_count(&links);
        links.truncate(retained);

        self.graph.insert(node.clone(), links)?;
        self.depths.record(node.clone(), depth);
        self.frontier.discover(node.clone());
        self.discovered += 1;

        tracing::trace!("Item {}: {} (depth {})", self.discovered, node, depth);
        if self.discovered % PROGRESS_INTERVAL == 0 {
            notify!(
                self.options.silent,
                "{:6} items scraped - last one: {}",
                self.discovered,
                node
            );
        }

        Ok(())
    }

    /// Number of links a newly found node keeps
    ///
    /// With a detected branching limit, the first node with links sets the
    /// limit for the rest of the run. Depth-first search then widens each
    /// node's share one link at a time until it includes a node not yet in the
    /// graph, so the branch has somewhere new to go. The widening stops at the
    /// node's out-degree.
    fn retained_count(&mut self, links: &[NodeId]) -> usize {
        match self.breadth_limit {
            None => {
                if !links.is_empty() {
                    self.breadth_limit = Some(links.len());
                    notify!(
                        self.options.silent,
                        "Detected branching limit: {}",
                        links.len()
                    );
                }
                links.len()
            }
            Some(limit)
                if self.options.order == SearchOrder::Depth
                    && self.options.budgets.detects_breadth() =>
            {
                let mut count = limit.min(links.len());
                while count < links.len()
                    && links[..count]
                        .iter()
                        .all(|link| self.graph.contains(link.as_str()))
                {
                    count += 1;
                }
                count
            }
            Some(limit) => limit.min(links.len()),
        }
    }

    /// Fetches a node's links, applying the timeout and the failure policy
    async fn fetch(&self, node: &NodeId) -> Result<Vec<NodeId>, MapperError> {
        let result =
            match tokio::time::timeout(self.options.fetch_timeout, self.fetcher.fetch_links(node))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout {
                    node: node.to_string(),
                }),
            };

        match result {
            Ok(links) => Ok(links),
            Err(error) => match self.options.on_fetch_error {
                FetchFailurePolicy::Skip => {
                    tracing::warn!("{}; treating {} as having no links", error, error.node());
                    Ok(Vec::new())
                }
                FetchFailurePolicy::Abort => {
                    tracing::error!("{}; aborting traversal", error);
                    Err(error.into())
                }
            },
        }
    }

    fn finish(&mut self, termination: Termination) -> Step {
        if self.finished.is_none() {
            notify!(
                self.options.silent,
                "Traversal finished ({}): {} nodes, {} discovered, {} links retained",
                termination,
                self.graph.len(),
                self.discovered,
                self.graph.edge_count()
            );
            self.finished = Some(termination);
        }
        Step::Finished(termination)
    }

    fn into_outcome(self, termination: Termination) -> CrawlOutcome {
        CrawlOutcome {
            graph: self.graph,
            depths: self.depths,
            items_discovered: self.discovered,
            termination,
            effective_breadth: self.breadth_limit,
        }
    }
}
