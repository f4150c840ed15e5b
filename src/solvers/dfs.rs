use rand::{rngs::StdRng, seq::SliceRandom};

use super::{Agent, AgentRun, AgentState, Arrival};

/// Depth-first agent. Scans neighbors in its dispatch-biased order, or in a freshly shuffled
/// order when given a random source.
///
/// The stack only ever holds the live branch, so when the agent stops the stack is exactly the
/// route from the start to where it stands.
pub(super) fn solve_dfs(agent: &Agent, mut rng: Option<StdRng>) -> AgentRun {
    let seen = agent.seen_bit();
    let mut stack = vec![agent.start];
    let mut state = AgentState::Exploring;
    let mut won = false;
    let mut directions = agent.biased_directions();

    // Don't pop yet, the top of the stack is where the agent stands
    while let Some(&cur) = stack.last() {
        if agent.race_decided() {
            state = AgentState::Stopped;
            break;
        }

        if let Arrival::Goal { won: claimed } = agent.arrive(cur, seen) {
            state = AgentState::FoundGoal;
            won = claimed;
            break;
        }

        if let Some(rng) = rng.as_mut() {
            directions.shuffle(rng);
        }
        match directions
            .iter()
            .find_map(|&direction| agent.open_neighbor(cur, direction, seen))
        {
            Some(next) => stack.push(next),
            None => {
                stack.pop();
            }
        }
    }

    agent.paint_path(&stack);
    agent.finish(state, won, stack)
}
