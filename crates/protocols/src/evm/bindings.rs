//! Human-readable ABIs for the contracts the application reads.

use ethers::contract::abigen;

abigen!(
    Erc20,
    r#"[
        function decimals() external view returns (uint8)
        function balanceOf(address owner) external view returns (uint256)
        function allowance(address owner, address spender) external view returns (uint256)
    ]"#
);

abigen!(
    ConcentratedPool,
    r#"[
        function slot0() external view returns (uint160 sqrtPriceX96, int24 tick, uint16 observationIndex, uint16 observationCardinality, uint16 observationCardinalityNext, uint8 feeProtocol, bool unlocked)
        function liquidity() external view returns (uint128)
        function token0() external view returns (address)
        function token1() external view returns (address)
    ]"#
);

// JSON form: the human-readable parser flattens a lone `(..)[]` output into
// separate values, losing the array of tuples returned by the history call.
abigen!(
    SwapRouter,
    r#"[
        {"type":"function","name":"token0","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
        {"type":"function","name":"token1","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
        {"type":"function","name":"getTokenPrice","stateMutability":"view","inputs":[{"name":"pool","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"getPoolInfo","stateMutability":"view","inputs":[{"name":"pool","type":"address"}],"outputs":[{"name":"sqrtPriceX96","type":"uint160"},{"name":"tick","type":"int24"},{"name":"liquidity","type":"uint128"}]},
        {"type":"function","name":"getPoolBalances","stateMutability":"view","inputs":[{"name":"pool","type":"address"}],"outputs":[{"name":"balance0","type":"uint256"},{"name":"balance1","type":"uint256"}]},
        {"type":"function","name":"getUserTransactionHistory","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"tuple[]","components":[{"name":"","type":"uint256"},{"name":"","type":"uint8"},{"name":"","type":"address"},{"name":"","type":"address"},{"name":"","type":"uint256"},{"name":"","type":"uint256"},{"name":"","type":"uint256"},{"name":"","type":"bytes32"},{"name":"","type":"string"}]}]}
    ]"#
);
