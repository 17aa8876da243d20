fn main() {
    multiversx_sc_meta_lib::cli_main::<pair_mock::AbiProvider>();
}
