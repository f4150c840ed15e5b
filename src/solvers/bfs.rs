use std::collections::{HashMap, VecDeque};

use super::{Agent, AgentRun, AgentState, Arrival, Game};
use crate::maze::Point;

/// Breadth-first agent with a private parent map. Paints every cell it expands, which gives the
/// fanned-out coloring of overlapping agents.
pub(super) fn solve_bfs(agent: &Agent) -> AgentRun {
    // The start maps to the sentinel `None`
    let mut parents: HashMap<Point, Option<Point>> = HashMap::from([(agent.start, None)]);
    let mut queue = VecDeque::from([agent.start]);
    let mut state = AgentState::Exploring;
    let mut won = false;
    let mut cur = agent.start;
    let directions = agent.biased_directions();
    let marks = match agent.game {
        // Seen bits are how gather agents tell claimed goals apart
        Game::Gather => agent.paint_bit() | agent.seen_bit(),
        Game::Hunt | Game::Corners => agent.paint_bit(),
    };

    while let Some(next) = queue.pop_front() {
        if agent.race_decided() {
            state = AgentState::Stopped;
            break;
        }
        cur = next;

        if let Arrival::Goal { won: claimed } = agent.arrive(cur, marks) {
            state = AgentState::FoundGoal;
            won = claimed;
            break;
        }

        for &direction in &directions {
            if let Some(neighbor) = agent.open_neighbor(cur, direction, 0) {
                parents.entry(neighbor).or_insert_with(|| {
                    queue.push_back(neighbor);
                    Some(cur)
                });
            }
        }
    }

    let mut path = std::iter::successors(Some(cur), |p| parents.get(p).copied().flatten())
        .collect::<Vec<_>>();
    path.reverse();
    agent.finish(state, won, path)
}
