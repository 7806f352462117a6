/// Implemented by the configuration of every encoding and decoding stage.
pub trait ConfigType {
    fn default() -> Self;
}
