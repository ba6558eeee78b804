//! Coin catalogue, greedy coin piles and the selection pool.

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Denomination
{
    pub name: &'static str,
    pub value: u32,
    pub max_usable: u32,
}

pub const PENNY: Denomination = Denomination {
    name: "penny",
    value: 1,
    max_usable: 4,
};
pub const NICKEL: Denomination = Denomination {
    name: "nickel",
    value: 5,
    max_usable: 1,
};
pub const DIME: Denomination = Denomination {
    name: "dime",
    value: 10,
    max_usable: 2,
};
pub const QUARTER: Denomination = Denomination {
    name: "quarter",
    value: 25,
    max_usable: 40,
};

/// Palette order. Decomposition walks it from the back.
pub const CATALOGUE: [Denomination; 4] = [PENNY, NICKEL, DIME, QUARTER];

/// The most a pool can hold when every denomination is at its cap.
pub fn max_capped_total() -> u32
{
    CATALOGUE.iter().map(|denom| denom.value * denom.max_usable).sum()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoinId(u64);

impl CoinId
{
    pub fn get(self) -> u64
    {
        self.0
    }
}

impl fmt::Display for CoinId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "#{}", self.0)
    }
}

/// Session-wide id source. Ids only go up, so a removed id never comes back.
#[derive(Debug)]
pub struct CoinIds
{
    next: u64,
}

impl CoinIds
{
    pub fn new() -> Self
    {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> CoinId
    {
        let id = CoinId(self.next);
        self.next += 1;
        id
    }
}

impl Default for CoinIds
{
    fn default() -> Self
    {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedCoin
{
    pub id: CoinId,
    pub denomination: Denomination,
}

/// Uniform amount in `[lower, upper]`. An inverted range collapses to `lower`.
pub fn draw_amount<R: Rng + ?Sized>(lower: u32, upper: u32, rng: &mut R) -> u32
{
    rng.gen_range(lower..=upper.max(lower))
}

/// Greedy largest-first split of `target` into catalogue coins.
pub fn decompose(target: u32) -> Vec<Denomination>
{
    let mut coins = Vec::new();
    let mut remaining = target;
    for denomination in CATALOGUE.iter().rev() {
        while remaining >= denomination.value {
            coins.push(*denomination);
            remaining -= denomination.value;
        }
    }
    coins
}

/// The pile shown by the counting game: `decompose` with fresh ids, then a
/// Fisher-Yates shuffle so the layout says nothing about the value.
pub fn coin_pool_for<R: Rng + ?Sized>(target: u32, ids: &mut CoinIds, rng: &mut R) -> Vec<SelectedCoin>
{
    let mut coins: Vec<SelectedCoin> = decompose(target)
        .into_iter()
        .map(|denomination| SelectedCoin {
            id: ids.next_id(),
            denomination,
        })
        .collect();
    coins.shuffle(rng);
    coins
}

pub fn total_value(coins: &[SelectedCoin]) -> u32
{
    coins.iter().map(|coin| coin.denomination.value).sum()
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no more than {} {} coins allowed", .denomination.max_usable, .denomination.name)]
pub struct Overuse
{
    pub denomination: Denomination,
}

/// Coins the player has put together. The total is always derived from the
/// contents.
#[derive(Clone, Debug, Default)]
pub struct CoinPool
{
    coins: Vec<SelectedCoin>,
}

impl CoinPool
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn add(
        &mut self,
        denomination: Denomination,
        prevent_overuse: bool,
        ids: &mut CoinIds,
    ) -> Result<SelectedCoin, Overuse>
    {
        if prevent_overuse && self.count_of(denomination) >= denomination.max_usable {
            return Err(Overuse { denomination });
        }
        let coin = SelectedCoin {
            id: ids.next_id(),
            denomination,
        };
        self.coins.push(coin);
        Ok(coin)
    }

    pub fn remove(&mut self, id: CoinId) -> Option<SelectedCoin>
    {
        let index = self.coins.iter().position(|coin| coin.id == id)?;
        Some(self.coins.remove(index))
    }

    pub fn count_of(&self, denomination: Denomination) -> u32
    {
        self.coins
            .iter()
            .filter(|coin| coin.denomination == denomination)
            .count() as u32
    }

    pub fn total(&self) -> u32
    {
        total_value(&self.coins)
    }

    pub fn coins(&self) -> &[SelectedCoin]
    {
        &self.coins
    }

    pub fn is_empty(&self) -> bool
    {
        self.coins.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.coins.len()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn catalogue_is_ascending()
    {
        assert!(CATALOGUE.windows(2).all(|pair| pair[0].value < pair[1].value));
        assert_eq!(CATALOGUE[0].value, 1);
    }

    #[test]
    fn pile_sums_to_target_for_every_value()
    {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ids = CoinIds::new();
        for target in 0..1000 {
            let pile = coin_pool_for(target, &mut ids, &mut rng);
            assert_eq!(total_value(&pile), target, "target {target}");
        }
    }

    #[test]
    fn decomposition_is_greedy()
    {
        assert_eq!(decompose(41), vec![QUARTER, DIME, NICKEL, PENNY]);
        assert_eq!(decompose(30), vec![QUARTER, NICKEL]);
        assert_eq!(decompose(4), vec![PENNY; 4]);
        assert_eq!(decompose(100).len(), 4);
    }

    #[test]
    fn zero_gives_empty_pile()
    {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(coin_pool_for(0, &mut CoinIds::new(), &mut rng).is_empty());
    }

    #[test]
    fn shuffle_keeps_coins_and_sum()
    {
        let mut rng = StdRng::seed_from_u64(99);
        let mut ids = CoinIds::new();
        let pile = coin_pool_for(87, &mut ids, &mut rng);
        let mut shuffled: Vec<u32> = pile.iter().map(|coin| coin.denomination.value).collect();
        let mut greedy: Vec<u32> = decompose(87).iter().map(|coin| coin.value).collect();
        shuffled.sort_unstable();
        greedy.sort_unstable();
        assert_eq!(shuffled, greedy);
        assert_eq!(total_value(&pile), 87);
    }

    #[test]
    fn pile_ids_are_unique()
    {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ids = CoinIds::new();
        let mut pile = coin_pool_for(99, &mut ids, &mut rng);
        pile.extend(coin_pool_for(99, &mut ids, &mut rng));
        let mut seen: Vec<CoinId> = pile.iter().map(|coin| coin.id).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), pile.len());
    }

    #[test]
    fn total_follows_adds_and_removes()
    {
        let mut ids = CoinIds::new();
        let mut pool = CoinPool::new();
        let penny = pool.add(PENNY, true, &mut ids).unwrap();
        let nickel = pool.add(NICKEL, true, &mut ids).unwrap();
        assert_eq!(penny.id.get(), 1);
        assert_eq!(nickel.id.get(), 2);
        assert_eq!(pool.total(), 6);

        assert_eq!(pool.remove(penny.id), Some(penny));
        assert_eq!(pool.total(), 5);

        assert_eq!(pool.remove(penny.id), None);
        assert_eq!(pool.total(), 5);
    }

    #[test]
    fn removing_one_instance_keeps_its_twin()
    {
        let mut ids = CoinIds::new();
        let mut pool = CoinPool::new();
        let first = pool.add(PENNY, false, &mut ids).unwrap();
        let second = pool.add(PENNY, false, &mut ids).unwrap();
        pool.remove(first.id);
        assert_eq!(pool.coins(), &[second]);
        let third = pool.add(PENNY, false, &mut ids).unwrap();
        assert!(third.id > second.id);
    }

    #[test]
    fn overuse_is_refused_when_enabled()
    {
        let mut ids = CoinIds::new();
        let mut pool = CoinPool::new();
        assert_eq!(NICKEL.max_usable, 1);
        pool.add(NICKEL, true, &mut ids).unwrap();
        let err = pool.add(NICKEL, true, &mut ids).unwrap_err();
        assert_eq!(err.denomination, NICKEL);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.total(), 5);

        pool.add(NICKEL, false, &mut ids).unwrap();
        assert_eq!(pool.count_of(NICKEL), 2);
    }
}
