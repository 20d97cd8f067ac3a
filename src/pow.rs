//! The sha256bmb proof of work.
//!
//! A job hands out a 32 byte nonce and a difficulty. The miner searches for
//! a 64 byte block whose SHA-256 starts with `difficulty` zero bits:
//!
//! ```text
//!  0                  32  33                                  64
//! +-------------------+---+-----------------------------------+
//! |    job nonce      | d |   extranonce (random, 31 bytes)   |
//! +-------------------+---+-----------------------------------+
//!                          \_ u64 LE search counter _/
//! ```
//!
//! The second half of the block (from the difficulty byte on) is the
//! solution submitted back for the job.

use std::fmt;

use crate::block::{Block, BLOCK_LEN, DIGEST_LEN};
use crate::util::HexFmt;

/// Length of a job nonce.
pub const NONCE_LEN: usize = 32;

/// Length of a submitted solution.
pub const SOLUTION_LEN: usize = BLOCK_LEN - NONCE_LEN;

/// Largest difficulty a digest can satisfy.
pub const MAX_DIFFICULTY: u32 = (DIGEST_LEN * 8) as u32;

const DIFFICULTY_POS: usize = NONCE_LEN;
const COUNTER_POS: usize = DIFFICULTY_POS + 1;
const COUNTER_END: usize = COUNTER_POS + 8;

/// What a job asks the workers to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Start searching a new nonce.
    New,
    /// Search the nonce again.
    ///
    /// Workers handle this exactly like [`JobKind::New`]: the current search
    /// is cancelled and every worker starts over with a fresh extranonce.
    Restart,
    /// Stop searching.
    Stop,
}

/// Work handed out by a pool or node.
#[derive(Clone, PartialEq, Eq)]
pub struct Job {
    /// What to do with this job.
    pub kind: JobKind,
    /// Nonce for the first half of the block.
    pub nonce: [u8; NONCE_LEN],
    /// Required leading zero bits.
    pub difficulty: u8,
}

impl Job {
    /// A new job for `nonce` at `difficulty` leading zero bits.
    pub fn new(nonce: [u8; NONCE_LEN], difficulty: u8) -> Self {
        Job {
            kind: JobKind::New,
            nonce,
            difficulty,
        }
    }

    /// Restart the search for `nonce`, see [`JobKind::Restart`].
    pub fn restart(nonce: [u8; NONCE_LEN], difficulty: u8) -> Self {
        Job {
            kind: JobKind::Restart,
            nonce,
            difficulty,
        }
    }

    /// A job that only stops the workers.
    pub fn stop() -> Self {
        Job {
            kind: JobKind::Stop,
            nonce: [0; NONCE_LEN],
            difficulty: 0,
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("kind", &self.kind)
            .field("nonce", &HexFmt(&self.nonce).to_string())
            .field("difficulty", &self.difficulty)
            .finish()
    }
}

/// A found solution, together with the job nonce it solves.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// Nonce of the job this solves.
    pub nonce: [u8; NONCE_LEN],
    /// Second half of the block, starting with the difficulty byte.
    pub bytes: [u8; SOLUTION_LEN],
}

impl Solution {
    /// Whether this solves its nonce at `difficulty`.
    pub fn verify(&self, difficulty: u8) -> bool {
        verify(&self.nonce, &self.bytes, difficulty)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&HexFmt(&self.bytes), f)
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("nonce", &HexFmt(&self.nonce).to_string())
            .field("bytes", &HexFmt(&self.bytes).to_string())
            .finish()
    }
}

/// The block being searched for one job.
#[derive(Debug, Clone)]
pub struct Challenge {
    block: Block,
    difficulty: u8,
}

impl Challenge {
    /// Lay out the block for `nonce` with a random extranonce from `rng`.
    pub fn new(nonce: &[u8; NONCE_LEN], difficulty: u8, rng: &mut fastrand::Rng) -> Self {
        let mut block = Block::zeroed();
        let b = block.as_bytes_mut();

        b[..NONCE_LEN].copy_from_slice(nonce);
        b[DIFFICULTY_POS] = difficulty;
        rng.fill(&mut b[COUNTER_POS..]);

        Challenge { block, difficulty }
    }

    /// The block as it will be hashed next time.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Required leading zero bits.
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// The search counter, bytes 33..41 little endian.
    pub fn counter(&self) -> u64 {
        let mut v = [0; 8];
        v.copy_from_slice(&self.block.as_bytes()[COUNTER_POS..COUNTER_END]);
        u64::from_le_bytes(v)
    }

    /// Step the search counter, wrapping at `u64::MAX`.
    pub fn advance(&mut self) {
        let next = self.counter().wrapping_add(1);
        self.block.as_bytes_mut()[COUNTER_POS..COUNTER_END].copy_from_slice(&next.to_le_bytes());
    }

    /// Advance, hash, and return the solution if the digest meets the difficulty.
    #[inline]
    pub fn try_next(&mut self) -> Option<Solution> {
        self.advance();
        let hash = self.block.hash();

        if check_leading_zero_bits(hash.as_bytes(), self.difficulty as u32) {
            Some(self.solution())
        } else {
            None
        }
    }

    /// The current block split into job nonce and solution bytes.
    pub fn solution(&self) -> Solution {
        let b = self.block.as_bytes();
        let mut nonce = [0; NONCE_LEN];
        let mut bytes = [0; SOLUTION_LEN];
        nonce.copy_from_slice(&b[..NONCE_LEN]);
        bytes.copy_from_slice(&b[NONCE_LEN..]);
        Solution { nonce, bytes }
    }
}

/// Whether `hash` starts with at least `difficulty` zero bits.
#[inline]
pub fn check_leading_zero_bits(hash: &[u8; DIGEST_LEN], difficulty: u32) -> bool {
    if difficulty > MAX_DIFFICULTY {
        return false;
    }

    let zero_bytes = (difficulty / 8) as usize;
    let remaining_bits = difficulty % 8;

    if hash[..zero_bytes].iter().any(|b| *b != 0) {
        return false;
    }

    remaining_bits == 0 || hash[zero_bytes] >> (8 - remaining_bits) == 0
}

/// Check a submitted solution against its job nonce.
///
/// The solution must carry the difficulty in its first byte, and the block
/// `nonce || solution` must hash to at least that many leading zero bits.
pub fn verify(nonce: &[u8; NONCE_LEN], solution: &[u8; SOLUTION_LEN], difficulty: u8) -> bool {
    if solution[0] != difficulty {
        return false;
    }

    let mut block = [0; BLOCK_LEN];
    block[..NONCE_LEN].copy_from_slice(nonce);
    block[NONCE_LEN..].copy_from_slice(solution);

    let hash = Block::new(block).hash();
    check_leading_zero_bits(hash.as_bytes(), difficulty as u32)
}
