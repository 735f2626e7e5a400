mod upstream_reply_test;
