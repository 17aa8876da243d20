fn main() {
    multiversx_sc_meta_lib::cli_main::<revenue_voter::AbiProvider>();
}
