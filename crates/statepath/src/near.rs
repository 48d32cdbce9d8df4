use crate::Solver;
use crate::error::{Endpoint, SolveError};
use crate::traits::{Graph, StateCost};

impl<G: Graph> Solver<G> {
    /// Collect every state reachable from `start` at a cost of at most
    /// `max_cost`.
    ///
    /// `near` is cleared, then receives the states in the order their cost
    /// is finalised, starting with `start` at cost 0. Shares state records
    /// and cached adjacency with [`solve`](Solver::solve), but does not
    /// consult or feed the path cache.
    pub fn solve_for_near_states(
        &mut self,
        start: G::Node,
        max_cost: f32,
        near: &mut Vec<StateCost<G::Node>>,
    ) -> Result<(), SolveError> {
        near.clear();
        if !self.graph().contains(start) {
            return Err(SolveError::InvalidEndpoint(Endpoint::Start));
        }

        self.begin_frame();
        let start_id = self.state_for(start)?;
        self.touch(start_id, 0.0);
        self.open_with(start_id, 0.0, None);

        while let Some(entry) = self.open.pop() {
            let rec = &mut self.pool[entry.id];
            if rec.frame != self.frame || !rec.open || rec.seq != entry.seq {
                continue;
            }
            rec.open = false;
            rec.closed = true;
            near.push(StateCost::new(rec.node, rec.g));

            let g = rec.g;
            let edges = match self.adjacency(entry.id) {
                Ok(edges) => edges,
                Err(e) => {
                    log::warn!(
                        "near-state search from {} aborted after {} states: {e}",
                        self.graph().describe(start),
                        near.len()
                    );
                    return Err(e);
                }
            };
            for e in &edges {
                if g + e.cost > max_cost {
                    continue;
                }
                if self.pool[e.to].frame != self.frame {
                    self.touch(e.to, 0.0);
                }
                self.relax(entry.id, g, e);
            }
            self.pool[entry.id].edges = Some(edges);
        }
        Ok(())
    }
}
