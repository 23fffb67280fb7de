mod unit {
    mod test_domain;
    mod test_moderation;
}
