mod context_passage_test;
