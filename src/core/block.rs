use crate::core::fork_schedule::{Era, ForkSchedule};
use crate::core::monetary::{convert, Denomination};
use crate::error::Result;
use crate::utils::{RawFields, RawRecord, UtcTimestamp};
use chrono::{DateTime, Utc};
use log::debug;
use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::Zero;

/// Header fields shared by canonical blocks and uncles.
///
/// Numeric fields are parsed from node JSON-RPC hex quantities. The opaque
/// fields are kept verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    hash: String,
    number: u64,
    parent_hash: String,
    miner: String,
    difficulty: BigUint,
    gas_limit: BigUint,
    gas_used: BigUint,
    base_fee_per_gas: Option<BigUint>, // absent before the fee market
    timestamp: UtcTimestamp,
    mix_hash: String,
    nonce: String,
    logs_bloom: String,
    receipts_root: String,
    sha3_uncles: String,
    size: String,
    state_root: String,
}

impl BlockHeader {
    pub(crate) fn from_fields(fields: &RawFields<'_>) -> Result<BlockHeader> {
        Ok(BlockHeader {
            hash: fields.required_string("hash")?,
            number: fields.hex_u64("number")?,
            parent_hash: fields.required_string("parentHash")?,
            miner: fields.required_string("miner")?,
            difficulty: fields.hex("difficulty")?,
            gas_limit: fields.hex("gasLimit")?,
            gas_used: fields.hex("gasUsed")?,
            base_fee_per_gas: fields.optional_hex("baseFeePerGas")?,
            timestamp: UtcTimestamp::from_secs(fields.hex_u64("timestamp")?)?,
            mix_hash: fields.required_string("mixHash")?,
            nonce: fields.required_string("nonce")?,
            logs_bloom: fields.required_string("logsBloom")?,
            receipts_root: fields.required_string("receiptsRoot")?,
            sha3_uncles: fields.required_string("sha3Uncles")?,
            size: fields.required_string("size")?,
            state_root: fields.required_string("stateRoot")?,
        })
    }

    pub fn get_hash(&self) -> &str {
        &self.hash
    }

    pub fn get_number(&self) -> u64 {
        self.number
    }

    pub fn get_parent_hash(&self) -> &str {
        &self.parent_hash
    }

    pub fn get_miner(&self) -> &str {
        &self.miner
    }

    pub fn get_difficulty(&self) -> &BigUint {
        &self.difficulty
    }

    pub fn get_gas_limit(&self) -> &BigUint {
        &self.gas_limit
    }

    pub fn get_gas_used(&self) -> &BigUint {
        &self.gas_used
    }

    pub fn get_base_fee_per_gas(&self) -> Option<&BigUint> {
        self.base_fee_per_gas.as_ref()
    }

    pub fn get_timestamp(&self) -> &UtcTimestamp {
        &self.timestamp
    }

    pub fn get_mix_hash(&self) -> &str {
        &self.mix_hash
    }

    pub fn get_nonce(&self) -> &str {
        &self.nonce
    }

    pub fn get_logs_bloom(&self) -> &str {
        &self.logs_bloom
    }

    pub fn get_receipts_root(&self) -> &str {
        &self.receipts_root
    }

    pub fn get_sha3_uncles(&self) -> &str {
        &self.sha3_uncles
    }

    pub fn get_size(&self) -> &str {
        &self.size
    }

    pub fn get_state_root(&self) -> &str {
        &self.state_root
    }

    /// Wei burned by the base fee: `gas_used × base_fee_per_gas`, zero before the fee market
    pub fn burned_wei(&self) -> BigUint {
        match &self.base_fee_per_gas {
            Some(base_fee) => &self.gas_used * base_fee,
            None => BigUint::zero(),
        }
    }

    pub fn burned_ether(&self) -> BigRational {
        convert(&self.burned_wei(), Denomination::Ether)
    }

    /// Midnight UTC of the block's day
    pub fn day(&self) -> DateTime<Utc> {
        self.timestamp.day()
    }

    /// Start of the block's UTC hour
    pub fn hour(&self) -> DateTime<Utc> {
        self.timestamp.hour()
    }
}

/// A canonical (non-uncle) mined block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    header: BlockHeader,
    total_difficulty: String,
    raw: RawRecord,
}

impl BlockRecord {
    pub fn from_raw(raw: &RawRecord) -> Result<BlockRecord> {
        let fields = RawFields::new(raw);
        let header = BlockHeader::from_fields(&fields)?;
        let total_difficulty = fields.required_string("totalDifficulty")?;

        debug!("Parsed block {} ({})", header.number, header.hash);
        Ok(BlockRecord {
            header,
            total_difficulty,
            raw: raw.clone(),
        })
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn get_hash(&self) -> &str {
        self.header.get_hash()
    }

    pub fn get_number(&self) -> u64 {
        self.header.get_number()
    }

    pub fn get_total_difficulty(&self) -> &str {
        &self.total_difficulty
    }

    pub fn era(&self, schedule: &ForkSchedule) -> Era {
        schedule.era_for(self.header.number)
    }

    /// Newly issued wei for mining this block, from the era of its height
    pub fn base_issuance(&self, schedule: &ForkSchedule) -> BigUint {
        schedule.base_reward_wei(self.header.number)
    }

    pub fn base_issuance_ether(&self, schedule: &ForkSchedule) -> BigRational {
        convert(&self.base_issuance(schedule), Denomination::Ether)
    }

    pub fn burned_wei(&self) -> BigUint {
        self.header.burned_wei()
    }

    pub fn burned_ether(&self) -> BigRational {
        self.header.burned_ether()
    }

    pub fn day(&self) -> DateTime<Utc> {
        self.header.day()
    }

    pub fn hour(&self) -> DateTime<Utc> {
        self.header.hour()
    }

    /// The mapping this record was built from, unmodified
    pub fn to_raw(&self) -> &RawRecord {
        &self.raw
    }
}
