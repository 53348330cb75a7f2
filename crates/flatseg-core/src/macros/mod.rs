mod cfg;
