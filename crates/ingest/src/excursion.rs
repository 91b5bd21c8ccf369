use crate::columns::NET_USD;
use crate::error::RowError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const WIN_MAE_SHARE: Decimal = dec!(0.2);
const WIN_MFE_SHARE: Decimal = dec!(1.2);
const LOSS_MAE_SHARE: Decimal = dec!(1.5);
const LOSS_MFE_SHARE: Decimal = dec!(0.3);

/// Fills in MAE/MFE for statements that carry no excursion data.
///
/// This is a heuristic, not a measurement. Winners are assumed to have gone
/// 20% of their result against the position and peaked at 120% of it.
/// Losers and break-evens are assumed to have drawn down to 150% of the
/// result after running 30% of its size in favour. Anything derived from
/// synthesized values, exit efficiency in particular, is an approximation.
///
/// Values that are present are returned untouched. A result so large that
/// the estimate leaves the `Decimal` range is rejected.
pub fn synthesize(
    net_pl: Decimal,
    mae: Option<Decimal>,
    mfe: Option<Decimal>,
) -> Result<(Decimal, Decimal), RowError> {
    let win = net_pl > Decimal::ZERO;
    let share = |factor: Decimal| {
        net_pl.checked_mul(factor).ok_or_else(|| RowError::InvalidNumber {
            column: NET_USD,
            value: net_pl.to_string(),
        })
    };

    let mae = match mae {
        Some(mae) => mae,
        None if win => -share(WIN_MAE_SHARE)?.abs(),
        None => share(LOSS_MAE_SHARE)?,
    };
    let mfe = match mfe {
        Some(mfe) => mfe,
        None if win => share(WIN_MFE_SHARE)?,
        None => share(LOSS_MFE_SHARE)?.abs(),
    };

    Ok((mae, mfe))
}
