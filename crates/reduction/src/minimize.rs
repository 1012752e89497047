use std::collections::VecDeque;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;
use log::debug;
use log::trace;

use fsm_automata::Dfa;
use fsm_automata::DfaState;
use fsm_automata::StateIndex;
use fsm_automata::SymbolIndex;
use fsm_collections::VecSet;
use fsm_utilities::Timing;

/// The partition of the states into blocks of states that can not (yet) be
/// distinguished.
struct Partition {
    blocks: Vec<Vec<StateIndex>>,
    /// The block of every state, none for the states that are left out.
    block_of: Vec<Option<usize>>,
}

impl Partition {
    /// Splits the live states and the start state into accepting and non
    /// accepting blocks, leaving out an empty block.
    fn new(dfa: &Dfa, live: &BitSlice) -> Self {
        let initial = dfa.initial_state_index();
        let (accepting, rejecting): (Vec<StateIndex>, Vec<StateIndex>) = dfa
            .iter_states()
            .filter(|state_index| live[**state_index] || Some(*state_index) == initial)
            .partition(|state_index| dfa.is_accepting(*state_index));

        let mut partition = Self {
            blocks: Vec::new(),
            block_of: vec![None; dfa.num_of_states()],
        };

        for block in [accepting, rejecting] {
            if !block.is_empty() {
                partition.add_block(block);
            }
        }

        partition
    }

    fn add_block(&mut self, states: Vec<StateIndex>) -> usize {
        let block = self.blocks.len();
        for state_index in &states {
            self.block_of[**state_index] = Some(block);
        }
        self.blocks.push(states);
        block
    }

    fn num_of_blocks(&self) -> usize {
        self.blocks.len()
    }
}

/// Minimizes the given deterministic automaton by partition refinement.
///
/// The states are first split into accepting and non accepting states, after
/// which blocks are split with respect to the predecessors of a splitter
/// block until the partition is stable. The transition function may be
/// partial, in which case both initial blocks must act as splitter. The block
/// containing the start state becomes state zero, the other blocks are ordered
/// by their smallest state.
///
/// States from which no accepting state can be reached are removed, together
/// with the transitions into them, since a missing transition already rejects
/// every word. Only the start state is kept when its language is empty.
pub fn minimize(dfa: &Dfa, timing: &mut Timing) -> Dfa {
    let mut timer = timing.start("minimize");
    let num_of_symbols = dfa.alphabet().len();

    // The predecessors of state `t` for symbol `a` are at `t * num_of_symbols + a`.
    let mut predecessors: Vec<Vec<StateIndex>> = vec![Vec::new(); dfa.num_of_states() * num_of_symbols];
    for from in dfa.iter_states() {
        for (symbol, to) in dfa.outgoing_transitions(from) {
            predecessors[*to * num_of_symbols + *symbol].push(from);
        }
    }

    let live = live_states(dfa, &predecessors);
    let mut partition = Partition::new(dfa, &live);

    let mut queue: VecDeque<usize> = (0..partition.num_of_blocks()).collect();
    let mut queued = bitvec![usize, Lsb0; 1; partition.num_of_blocks()];

    // The states that have a transition into the splitter, and per block the marked states.
    let mut in_splitter = bitvec![usize, Lsb0; 0; dfa.num_of_states()];
    let mut marked: Vec<Vec<StateIndex>> = vec![Vec::new(); partition.num_of_blocks()];
    let mut touched: Vec<usize> = Vec::new();

    while let Some(splitter) = queue.pop_front() {
        queued.set(splitter, false);
        let splitter_states = partition.blocks[splitter].clone();

        for symbol in 0..num_of_symbols {
            // A transition into a dead state counts as a missing transition.
            for to in splitter_states.iter().filter(|to| live[***to]) {
                for from in &predecessors[**to * num_of_symbols + symbol] {
                    let block = partition.block_of[**from].expect("A predecessor of a live state is live");
                    if marked[block].is_empty() {
                        touched.push(block);
                    }
                    marked[block].push(*from);
                    in_splitter.set(**from, true);
                }
            }

            for block in touched.drain(..) {
                let split_off = std::mem::take(&mut marked[block]);

                if split_off.len() < partition.blocks[block].len() {
                    partition.blocks[block].retain(|state_index| !in_splitter[**state_index]);
                    let new_block = partition.add_block(split_off);
                    marked.push(Vec::new());
                    queued.push(false);

                    trace!(
                        "Split block {block} into {} and {} states on symbol {}",
                        partition.blocks[block].len(),
                        partition.blocks[new_block].len(),
                        dfa.symbol(SymbolIndex::new(symbol))
                    );

                    if queued[block] {
                        queue.push_back(new_block);
                        queued.set(new_block, true);
                    } else {
                        // Splitting on the smaller half suffices since the parent block was already a splitter.
                        let smaller = if partition.blocks[new_block].len() < partition.blocks[block].len() {
                            new_block
                        } else {
                            block
                        };
                        queue.push_back(smaller);
                        queued.set(smaller, true);
                    }

                    for state_index in &partition.blocks[new_block] {
                        in_splitter.set(**state_index, false);
                    }
                } else {
                    for state_index in &split_off {
                        in_splitter.set(**state_index, false);
                    }
                }
            }
        }
    }

    let result = quotient(dfa, &partition, &live);
    debug!(
        "Minimized {} states into {} states, removing {} dead states",
        dfa.num_of_states(),
        result.num_of_states(),
        live.count_zeros()
    );

    timer.finish();
    result
}

/// Returns the states from which an accepting state can be reached, by a
/// backwards breadth first search from the accepting states.
fn live_states(dfa: &Dfa, predecessors: &[Vec<StateIndex>]) -> BitVec<usize, Lsb0> {
    let num_of_symbols = dfa.alphabet().len();
    let mut live = bitvec![usize, Lsb0; 0; dfa.num_of_states()];
    let mut queue: VecDeque<StateIndex> = dfa
        .iter_states()
        .filter(|state_index| dfa.is_accepting(*state_index))
        .collect();
    for state_index in &queue {
        live.set(**state_index, true);
    }

    while let Some(state_index) = queue.pop_front() {
        for symbol in 0..num_of_symbols {
            for from in &predecessors[*state_index * num_of_symbols + symbol] {
                if !live[**from] {
                    live.set(**from, true);
                    queue.push_back(*from);
                }
            }
        }
    }

    live
}

/// Constructs the automaton with one state per block of the partition.
fn quotient(dfa: &Dfa, partition: &Partition, live: &BitSlice) -> Dfa {
    // The block of the start state comes first, then the blocks ordered by their smallest state.
    let mut order: Vec<usize> = (0..partition.num_of_blocks()).collect();
    let initial_block = dfa
        .initial_state_index()
        .and_then(|state_index| partition.block_of[*state_index]);
    order.sort_by_key(|block| {
        (
            Some(*block) != initial_block,
            partition.blocks[*block].iter().min().copied(),
        )
    });

    let mut new_index = vec![StateIndex::new(0); partition.num_of_blocks()];
    for (index, block) in order.iter().enumerate() {
        new_index[*block] = StateIndex::new(index);
    }

    let mut result = Dfa::new(dfa.alphabet().to_vec());
    for block in &order {
        let members = &partition.blocks[*block];
        let representative = *members.iter().min().expect("Blocks of the partition are never empty");

        result.add_state(DfaState {
            name: dfa.state(representative).name.clone(),
            is_start: members.iter().any(|state_index| dfa.state(*state_index).is_start),
            is_accept: members.iter().any(|state_index| dfa.is_accepting(*state_index)),
            nfa_states: members
                .iter()
                .flat_map(|state_index| dfa.state(*state_index).nfa_states.iter().copied())
                .collect::<VecSet<StateIndex>>(),
        });
    }

    for block in &order {
        let representative = *partition.blocks[*block]
            .iter()
            .min()
            .expect("Blocks of the partition are never empty");

        for (symbol, to) in dfa.outgoing_transitions(representative) {
            if live[*to] {
                let to_block = partition.block_of[*to].expect("Live states are part of the partition");
                result.set_transition(new_index[*block], symbol, new_index[to_block]);
            }
        }
    }

    result
}
