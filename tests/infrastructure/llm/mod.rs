mod openai_judge_client_test;
