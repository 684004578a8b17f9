mod exchange;
mod models;
mod option_symbol;

pub use exchange::Exchange;
pub use models::{
    round_dp, DepthLevel, DepthRecord, Greeks, GreeksResult, HistoryBar, IntervalMatrix,
    QuoteRecord, DEPTH_LEVELS,
};
pub use option_symbol::{OptionSide, OptionSymbol};
